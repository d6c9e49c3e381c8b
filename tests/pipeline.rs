//! End-to-end checks of the report pipeline through the library API.

use game_metrics_plot::metrics::Column;
use game_metrics_plot::{
    dataset, DisplayMode, FigurePlotter, MetricsLog, Player, ReportConfig, ReportError,
    ReportGenerator,
};
use std::fs;
use std::path::Path;

const THREE_TURNS: &str = "\
turn,p0_manhattan,p0_shortest_path,p1_manhattan,p1_shortest_path,p0_walls_placed,p1_walls_placed
0,5,5,6,6,0,0
1,4,6,5,5,1,0
2,3,3,4,4,1,0
";

fn config(dir: &Path) -> ReportConfig {
    ReportConfig::default()
        .with_dpi(50)
        .with_output_path(dir.join("metrics_plot.png"))
        .with_display(DisplayMode::Never)
}

#[test]
fn three_turn_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("game_metrics.csv");
    fs::write(&input, THREE_TURNS).unwrap();

    let outcome = ReportGenerator::new(config(dir.path())).run(&input).unwrap();

    assert_eq!(outcome.table.divergence(Player::Zero), &[0.0, 2.0, 0.0]);
    assert_eq!(outcome.table.divergence(Player::One), &[0.0, 0.0, 0.0]);

    let p0 = outcome.summary.player(Player::Zero);
    assert_eq!(p0.max_divergence, 2.0);
    assert_eq!(format!("{:.1}", p0.avg_divergence), "0.7");
    assert_eq!(p0.walls_placed, 1);

    assert_eq!(
        outcome.summary.to_string(),
        "=== Statistics ===\n\
         Total turns: 3\n\
         \n\
         Player 0:\n  Max divergence: 2.0\n  Avg divergence: 0.7\n  Walls placed: 1\n\
         \n\
         Player 1:\n  Max divergence: 0.0\n  Avg divergence: 0.0\n  Walls placed: 0"
    );
}

#[test]
fn divergence_is_shortest_minus_manhattan_on_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let log = MetricsLog::create(dir.path().join("game_metrics.csv")).unwrap();

    // A longer game where walls push the true path away from the estimate
    for turn in 0..40i64 {
        let walls = [turn / 4, turn / 5];
        let manhattan = [(8 - turn / 5).max(0) as f64, (8 - turn / 6).max(0) as f64];
        let detour = [(turn % 7 / 3) as f64 * 2.0, (turn % 5 / 4) as f64 * 2.0];
        log.append(&game_metrics_plot::MetricsRow {
            turn,
            manhattan,
            shortest_path: [manhattan[0] + detour[0], manhattan[1] + detour[1]],
            walls_placed: walls,
            is_terminal: Some(turn == 39),
        })
        .unwrap();
    }

    let outcome = ReportGenerator::new(config(dir.path()))
        .run(log.path())
        .unwrap();
    let table = &outcome.table;

    assert_eq!(outcome.summary.total_turns, 40);
    for player in Player::ALL {
        let shortest = table.series(player, Column::ShortestPath);
        let manhattan = table.series(player, Column::Manhattan);
        let divergence = table.divergence(player);

        for i in 0..table.len() {
            assert_eq!(divergence[i], shortest[i].1 - manhattan[i].1);
        }

        let max = divergence.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = divergence.iter().sum::<f64>() / divergence.len() as f64;
        let summary = outcome.summary.player(player);
        assert_eq!(summary.max_divergence, max);
        assert_eq!(summary.avg_divergence, mean);
        assert_eq!(summary.walls_placed, table.rows()[39].walls_placed[player.index()]);
    }
}

#[test]
fn same_input_same_image_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("game_metrics.csv");
    fs::write(&input, THREE_TURNS).unwrap();

    let first_config = config(dir.path()).with_output_path(dir.path().join("first.png"));
    let second_config = config(dir.path()).with_output_path(dir.path().join("second.png"));

    let first = ReportGenerator::new(first_config.clone()).run(&input).unwrap();
    let second = ReportGenerator::new(second_config.clone()).run(&input).unwrap();

    assert_eq!(first.summary.to_string(), second.summary.to_string());
    assert_eq!(
        fs::read(&first_config.output_path).unwrap(),
        fs::read(&second_config.output_path).unwrap()
    );
    assert_eq!(
        FigurePlotter::render_to_buffer(&first.panels, &first_config).unwrap(),
        FigurePlotter::render_to_buffer(&second.panels, &second_config).unwrap()
    );
}

#[test]
fn total_turns_counts_data_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("game_metrics.csv");
    let mut content = String::from(
        "turn,p0_manhattan,p0_shortest_path,p1_manhattan,p1_shortest_path,p0_walls_placed,p1_walls_placed\n",
    );
    for turn in 0..17 {
        content.push_str(&format!("{turn},4,4,4,5,0,{}\n", turn / 3));
    }
    fs::write(&input, content).unwrap();

    let outcome = ReportGenerator::new(config(dir.path())).run(&input).unwrap();
    assert_eq!(outcome.summary.total_turns, 17);
    assert_eq!(outcome.summary.player(Player::One).walls_placed, 5);
    assert_eq!(outcome.summary.player(Player::One).avg_divergence, 1.0);
}

#[test]
fn missing_wall_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("game_metrics.csv");
    fs::write(
        &input,
        "turn,p0_manhattan,p0_shortest_path,p1_manhattan,p1_shortest_path,p0_walls_placed\n0,5,5,4,4,0\n",
    )
    .unwrap();

    let err = dataset::load(&input).unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn { ref column, .. } if column == "p1_walls_placed"));

    let generator = ReportGenerator::new(config(dir.path()));
    assert!(generator.run(&input).is_err());
    assert!(!generator.config().output_path.exists());
}

#[test]
fn existing_image_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("game_metrics.csv");
    fs::write(&input, THREE_TURNS).unwrap();

    let config = config(dir.path());
    fs::write(&config.output_path, b"not a png").unwrap();

    ReportGenerator::new(config.clone()).run(&input).unwrap();
    let bytes = fs::read(&config.output_path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}
