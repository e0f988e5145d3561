//! Repeated-run averaging
//!
//! Reduces the repeated runs of one condition to one row per nominal speed
//! and recomputes the whole model-scale and full-scale resistance chain
//! from the averaged channels.

use tracing::{debug, error, info, warn};

use super::statistics::{mean, population_std_dev};
use super::AnalysisError;
use crate::config::{AnalysisConfig, UnknownConditionPolicy};
use crate::hydrodynamics::{
    air_resistance_coeff, brake_power, cf_grigson, cf_ittc57, correlation_allowance,
    drag_to_newtons, effective_power, froude_number, full_scale_speed, heave,
    resistance_coefficient, resistance_from_coefficient, reynolds_number, roughness_allowance,
    trim_degrees, turbulence_stimulator_correction, MS_TO_KNOTS,
};
use crate::types::{
    AveragedRow, FullScaleResults, HullConditionConstants, HullConditionTable, ModelScaleResults,
    RepeatSpread, ResultsRow,
};

/// Average the repeated runs of one condition into one row per speed group.
///
/// Rows of `table` whose run number appears in `repeat_runs` are selected in
/// table order and partitioned by exact equality of their recorded Froude
/// number; groups keep the order of first appearance. Run numbers missing
/// from the table are logged and skipped. No matching rows gives an empty
/// result.
///
/// # Errors
/// `AnalysisError::UnknownCondition` when a group's condition code has no
/// entry in `hulls` and the config policy is `abort`.
pub fn average_condition_runs(
    repeat_runs: &[u32],
    table: &[ResultsRow],
    hulls: &HullConditionTable,
    config: &AnalysisConfig,
) -> Result<Vec<AveragedRow>, AnalysisError> {
    for &run in repeat_runs {
        if !table.iter().any(|r| r.run_number == run) {
            warn!(run, "Run not found in results table, skipping");
        }
    }

    let selected: Vec<&ResultsRow> = table
        .iter()
        .filter(|r| repeat_runs.contains(&r.run_number))
        .collect();

    if selected.is_empty() {
        info!(requested = repeat_runs.len(), "No matching runs, nothing to average");
        return Ok(Vec::new());
    }

    let groups = group_by_froude(&selected);
    let mut averaged = Vec::with_capacity(groups.len());

    for group in &groups {
        let first = group[0];
        let code = first.condition;

        if let Some(other) = group.iter().find(|r| r.condition != code) {
            warn!(
                code,
                other_code = other.condition,
                run = other.run_number,
                "Speed group mixes condition codes, using the first"
            );
        }

        let Some(hull) = hulls.get(code) else {
            match config.analysis.unknown_condition {
                UnknownConditionPolicy::Abort => {
                    return Err(AnalysisError::UnknownCondition {
                        code,
                        run_number: first.run_number,
                    });
                }
                UnknownConditionPolicy::Skip => {
                    error!(
                        code,
                        run = first.run_number,
                        "No hull constants for condition, speed group skipped"
                    );
                    continue;
                }
            }
        };

        let row = average_speed_group(group, hull, config);
        debug!(
            code,
            repeats = row.repeats,
            froude = row.froude_number,
            ctm = row.model.resistance_coeff,
            "Averaged speed group"
        );
        averaged.push(row);
    }

    info!(
        runs = selected.len(),
        groups = averaged.len(),
        "Averaged repeated runs"
    );
    Ok(averaged)
}

/// Partition rows by exact Froude number, order of first appearance.
fn group_by_froude<'a>(rows: &[&'a ResultsRow]) -> Vec<Vec<&'a ResultsRow>> {
    let mut groups: Vec<Vec<&'a ResultsRow>> = Vec::new();
    for &row in rows {
        match groups
            .iter_mut()
            .find(|g| g[0].froude_number == row.froude_number)
        {
            Some(group) => group.push(row),
            None => groups.push(vec![row]),
        }
    }
    groups
}

/// Run the resistance chain on the means of one speed group.
fn average_speed_group(
    group: &[&ResultsRow],
    hull: &HullConditionConstants,
    config: &AnalysisConfig,
) -> AveragedRow {
    let physics = &config.physics;
    let model_cfg = &config.model;
    let ts = &config.turbulence_stimulator;
    let code = group[0].condition;

    let column =
        |f: fn(&ResultsRow) -> f64| -> Vec<f64> { group.iter().map(|r| f(r)).collect() };
    let speeds = column(|r| r.speed);
    let fwds = column(|r| r.fwd_lvdt);
    let afts = column(|r| r.aft_lvdt);
    let drags = column(|r| r.drag);
    let trims = column(|r| r.trim);
    let ctms_x1000 = column(|r| r.model_resistance_coeff * 1000.0);

    let speed = mean(&speeds);
    let fwd_lvdt = mean(&fwds);
    let aft_lvdt = mean(&afts);
    let drag = mean(&drags);

    let heave_mm = heave(fwd_lvdt, aft_lvdt);
    let trim = trim_degrees(fwd_lvdt, aft_lvdt, model_cfg.lvdt_post_spacing_mm);
    let fr = froude_number(speed, hull.lwl_m, physics.gravity);

    // === Model scale ===
    let mut rtm = drag_to_newtons(drag, physics.gravity);
    let mut ts_reduction = 0.0;
    if ts.applies_to(code) {
        if let Some(correction) = turbulence_stimulator_correction(fr, ts.slope, ts.intercept) {
            rtm -= correction;
            ts_reduction = correction;
        }
    }

    let ctm = resistance_coefficient(rtm, physics.freshwater_density, hull.wsa_m2, speed);
    let re_m = reynolds_number(speed, hull.lwl_m, physics.model_kinematic_viscosity);
    let cfm_ittc = cf_ittc57(re_m);
    let cfm_grigson = cf_grigson(re_m);
    let cr = ctm - model_cfg.form_factor * cfm_grigson;
    let pe_m = effective_power(speed, rtm);

    let model = ModelScaleResults {
        lwl: hull.lwl_m,
        wsa: hull.wsa_m2,
        total_resistance: rtm,
        ts_reduction,
        resistance_coeff: ctm,
        reynolds: re_m,
        cf_ittc: cfm_ittc,
        cf_grigson: cfm_grigson,
        residual_coeff: cr,
        effective_power: pe_m,
        brake_power: brake_power(pe_m, model_cfg.propulsive_efficiency),
    };

    // === Full scale ===
    let lwl_fs = hull.full_scale_lwl(model_cfg.scale_ratio);
    let wsa_fs = hull.full_scale_wsa(model_cfg.scale_ratio);
    let v_fs = full_scale_speed(speed, model_cfg.scale_ratio);
    let re_fs = reynolds_number(v_fs, lwl_fs, physics.full_scale_kinematic_viscosity);
    let cfs_grigson = cf_grigson(re_fs);
    let delta_cf = roughness_allowance(model_cfg.hull_roughness_m, lwl_fs);
    let ca = correlation_allowance(re_fs);
    let caa = air_resistance_coeff(
        model_cfg.air_drag_coefficient,
        physics.air_density,
        model_cfg.frontal_area_m2,
        physics.saltwater_density,
        wsa_fs,
    );
    let cts = model_cfg.form_factor * cfs_grigson + delta_cf + ca + cr + caa;
    let rts = resistance_from_coefficient(cts, physics.saltwater_density, wsa_fs, v_fs);
    let pe_fs = effective_power(v_fs, rts);

    let full_scale = FullScaleResults {
        lwl: lwl_fs,
        wsa: wsa_fs,
        speed: v_fs,
        speed_knots: v_fs * MS_TO_KNOTS,
        reynolds: re_fs,
        cf_ittc: cf_ittc57(re_fs),
        cf_grigson: cfs_grigson,
        roughness_allowance: delta_cf,
        correlation_allowance: ca,
        air_resistance_coeff: caa,
        resistance_coeff: cts,
        total_resistance: rts,
        effective_power: pe_fs,
        brake_power: brake_power(pe_fs, model_cfg.propulsive_efficiency),
    };

    let spread = RepeatSpread {
        speed: population_std_dev(&speeds),
        fwd_lvdt: population_std_dev(&fwds),
        aft_lvdt: population_std_dev(&afts),
        drag: population_std_dev(&drags),
        trim: population_std_dev(&trims),
        resistance_coeff_x1000: population_std_dev(&ctms_x1000),
    };

    AveragedRow {
        repeats: group.len(),
        condition: code,
        speed,
        fwd_lvdt,
        aft_lvdt,
        drag,
        heave: heave_mm,
        trim,
        froude_number: fr,
        model,
        full_scale,
        spread,
    }
}
