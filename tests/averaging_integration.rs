//! Averaging Integration Tests
//!
//! End-to-end: results table on disk → reader → repeated-run averaging →
//! averaged tables on disk. Expected values are recomputed from the
//! closed-form relations so the tests pin the chain, not magic numbers.

use std::fmt::Write as _;
use std::path::Path;

use demihull_resistance::analysis::{average_condition_groups, average_condition_runs};
use demihull_resistance::config::{AnalysisConfig, RunGroup, UnknownConditionPolicy};
use demihull_resistance::table::{read_results_table, write_averaged_tables};
use demihull_resistance::types::{AVERAGED_COLUMNS, BASE_COLUMNS};
use demihull_resistance::AnalysisError;

struct Run {
    number: u32,
    speed: f64,
    fwd: f64,
    aft: f64,
    drag: f64,
    ctm: f64,
    froude: f64,
    trim: f64,
    condition: u8,
}

fn write_table(path: &Path, runs: &[Run]) {
    let mut text = String::new();
    for r in runs {
        let mut cols = vec![0.0; BASE_COLUMNS];
        cols[0] = f64::from(r.number);
        cols[1] = 200.0;
        cols[2] = 4000.0;
        cols[3] = 20.0;
        cols[4] = r.speed;
        cols[5] = r.fwd;
        cols[6] = r.aft;
        cols[7] = r.drag;
        cols[9] = r.ctm;
        cols[10] = r.froude;
        cols[12] = r.trim;
        cols[27] = f64::from(r.condition);
        let line: Vec<String> = cols.iter().map(|v| v.to_string()).collect();
        writeln!(text, "{}", line.join(",")).expect("format");
    }
    // Placeholder row left by the acquisition scripts
    writeln!(text, "{}", vec!["0"; BASE_COLUMNS].join(",")).expect("format");
    std::fs::write(path, text).expect("write table");
}

fn campaign_runs() -> Vec<Run> {
    let run = |number, speed, fwd, aft, drag, ctm, froude, trim, condition| Run {
        number,
        speed,
        fwd,
        aft,
        drag,
        ctm,
        froude,
        trim,
        condition,
    };
    vec![
        // Condition 1, bare hull
        run(1, 1.0, 2.0, 1.0, 200.0, 3.0e-3, 0.15, 0.1, 1),
        run(2, 1.1, 2.0, 1.0, 220.0, 3.2e-3, 0.15, 0.3, 1),
        run(3, 2.0, 10.0, 6.0, 900.0, 3.1e-3, 0.31, 0.2, 1),
        // Condition 7, turbulence studs
        run(81, 1.62, 5.0, 3.0, 650.0, 4.0e-3, 0.25, 0.1, 7),
        run(82, 1.62, 5.0, 3.0, 660.0, 4.1e-3, 0.25, 0.1, 7),
        // Unknown condition
        run(90, 1.0, 0.0, 0.0, 200.0, 3.0e-3, 0.15, 0.0, 14),
    ]
}

#[test]
fn condition_one_matches_closed_form_chain() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("full_resistance_data.dat");
    write_table(&path, &campaign_runs());

    let rows = read_results_table(&path).expect("read");
    assert_eq!(rows.len(), 6, "placeholder row must be dropped");

    let config = AnalysisConfig::default();
    let hulls = config.hull_table();
    let out = average_condition_runs(&[1, 2, 3], &rows, &hulls, &config).expect("average");
    assert_eq!(out.len(), 2);

    let low = &out[0];
    assert_eq!(low.repeats, 2);
    assert_eq!(low.condition, 1);

    let (g, lwl, wsa): (f64, f64, f64) = (9.806, 4.30, 1.501);
    let speed = 1.05;
    let rtm = 210.0 / 1000.0 * g;
    let ctm = rtm / (0.5 * 1000.0 * wsa * speed * speed);
    assert!((low.model.total_resistance - rtm).abs() < 1e-9);
    assert_eq!(low.model.ts_reduction, 0.0, "condition 1 carries no studs");
    assert!((low.model.resistance_coeff - ctm).abs() < 1e-12);

    let rounded_speed = (speed * 100.0f64).round() / 100.0;
    let expected_fr = (rounded_speed / (g * lwl).sqrt() * 100.0).round() / 100.0;
    assert!((low.froude_number - expected_fr).abs() < 1e-12);

    let re = speed * lwl / 1.0034e-6;
    assert!((low.model.reynolds - re).abs() / re < 1e-12);

    // Spread of the recorded per-run values
    assert!((low.spread.speed - 0.05).abs() < 1e-9);
    assert!((low.spread.drag - 10.0).abs() < 1e-9);
    assert!((low.spread.trim - 0.1).abs() < 1e-9);
    assert!((low.spread.resistance_coeff_x1000 - 0.1).abs() < 1e-9);
    assert_eq!(low.spread.fwd_lvdt, 0.0);

    let high = &out[1];
    assert_eq!(high.repeats, 1);
    assert!((high.heave - 8.0).abs() < 1e-12);
    assert!((high.trim - (4.0f64 / 1150.0).atan().to_degrees()).abs() < 1e-12);
    assert_eq!(high.spread.speed, 0.0);
}

#[test]
fn studded_condition_subtracts_positive_correction() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("full_resistance_data.dat");
    write_table(&path, &campaign_runs());
    let rows = read_results_table(&path).expect("read");

    let config = AnalysisConfig::default();
    let out = average_condition_runs(&[81, 82], &rows, &config.hull_table(), &config)
        .expect("average");
    assert_eq!(out.len(), 1);
    let r = &out[0];
    assert_eq!(r.froude_number, 0.25);
    let ts = 3.1638 * 0.25 - 0.4031;
    assert!((r.model.ts_reduction - ts).abs() < 1e-12);
    assert!((r.model.total_resistance - (0.655 * 9.806 - ts)).abs() < 1e-9);
}

#[test]
fn studded_condition_below_stud_threshold_keeps_resistance() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("full_resistance_data.dat");
    let slow = |number| Run {
        number,
        speed: 0.65,
        fwd: 1.0,
        aft: 0.5,
        drag: 150.0,
        ctm: 5.0e-3,
        froude: 0.10,
        trim: 0.0,
        condition: 7,
    };
    write_table(&path, &[slow(83), slow(84)]);
    let rows = read_results_table(&path).expect("read");

    let config = AnalysisConfig::default();
    let out = average_condition_runs(&[83, 84], &rows, &config.hull_table(), &config)
        .expect("average");
    assert_eq!(out.len(), 1);
    let r = &out[0];
    // 0.65 / sqrt(9.806 * 4.30) rounds to 0.10, where the stud line is negative
    assert_eq!(r.froude_number, 0.10);
    assert!(3.1638 * 0.10 - 0.4031 < 0.0);
    assert_eq!(r.model.ts_reduction, 0.0);
    assert!((r.model.total_resistance - 0.150 * 9.806).abs() < 1e-12);
}

#[test]
fn unknown_condition_aborts_or_skips_by_policy() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("full_resistance_data.dat");
    write_table(&path, &campaign_runs());
    let rows = read_results_table(&path).expect("read");

    let mut config = AnalysisConfig::default();
    let hulls = config.hull_table();
    let err = average_condition_runs(&[90], &rows, &hulls, &config).unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownCondition { code: 14, run_number: 90 }));

    config.analysis.unknown_condition = UnknownConditionPolicy::Skip;
    let out = average_condition_runs(&[90], &rows, &hulls, &config).expect("skip");
    assert!(out.is_empty());
}

#[test]
fn groups_are_averaged_in_order_and_written() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("full_resistance_data.dat");
    write_table(&path, &campaign_runs());
    let rows = read_results_table(&path).expect("read");

    let config = AnalysisConfig::default();
    let groups = vec![
        RunGroup {
            name: "Cond. 7".to_string(),
            runs: vec![81, 82],
        },
        RunGroup {
            name: "Cond. 1".to_string(),
            runs: vec![1, 2, 3, 500],
        },
    ];
    let results = average_condition_groups(&groups, &rows, &config.hull_table(), &config)
        .expect("groups");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "Cond. 7");
    assert_eq!(results[0].1.len(), 1);
    assert_eq!(results[1].1.len(), 2);

    let all: Vec<_> = results.iter().flat_map(|(_, r)| r.iter().cloned()).collect();
    let out_dir = dir.path().join("out");
    let (dat, txt) = write_averaged_tables(&out_dir, "resultsAveragedArray", &all).expect("write");

    let dat_text = std::fs::read_to_string(&dat).expect("read dat");
    let dat_lines: Vec<&str> = dat_text.lines().collect();
    assert_eq!(dat_lines.len(), 3);
    let first: Vec<f64> = dat_lines[0]
        .split(',')
        .map(|s| s.parse().expect("number"))
        .collect();
    assert_eq!(first.len(), AVERAGED_COLUMNS);
    assert_eq!(first[0], 2.0);
    assert_eq!(first[1], 7.0);
    // Full precision survives the round trip
    assert_eq!(first[11], all[0].model.resistance_coeff);

    let txt_text = std::fs::read_to_string(&txt).expect("read txt");
    let txt_first: Vec<&str> = txt_text.lines().next().expect("line").split('\t').collect();
    assert_eq!(txt_first.len(), AVERAGED_COLUMNS);
    assert_eq!(txt_first[0], "2");
}

#[test]
fn missing_table_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_results_table(&dir.path().join("nope.dat")).unwrap_err();
    assert!(matches!(err, demihull_resistance::TableError::Io { .. }));
}
