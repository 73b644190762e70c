//! Tournament tests: pool fairness, padding, early stop and abort.

use ruins::core::{ActionRequest, GameConfig, GameRng};
use ruins::events::{Event, EventClass, NullSink, RecordingSink};
use ruins::strategy::{builtin, Entrant, Scripted};
use ruins::tournament::{PoolBatcher, Tournament, TournamentConfig, TournamentOutcome};

/// Takes the first treasure at the minimum bid and leaves.
fn quick_thief() -> Entrant {
    Scripted::requests(vec![ActionRequest::take(0usize, 10u32), ActionRequest::Previous]).entrant("QuickThief")
}

fn labelled(label: &str, base: Entrant) -> Entrant {
    let proto = base.clone();
    Entrant::new(label, move |name, rng| proto.instantiate(name, rng))
}

/// With 23 bots and 10 seats, nobody's game count strays more than one from
/// anybody else's, and no game seats a bot twice.
#[test]
fn test_pool_fairness_23_bots() {
    let mut rng = GameRng::new(2024);
    let mut order: Vec<usize> = (0..23).collect();
    let mut batcher = PoolBatcher::new(10);
    let mut played = [0u32; 23];

    for _ in 0..20 {
        rng.shuffle(&mut order);
        for game in batcher.round(&order) {
            assert_eq!(game.len(), 10);
            let mut seats = game.clone();
            seats.sort_unstable();
            seats.dedup();
            assert_eq!(seats.len(), 10, "bot seated twice in {game:?}");
            for bot in game {
                played[bot] += 1;
            }
        }
    }

    let max = *played.iter().max().unwrap();
    let min = *played.iter().min().unwrap();
    assert!(max - min <= 1, "games played ranged {min}..={max}");
}

#[test]
fn test_pool_stage_runs_and_picks_finalists() {
    let roster: Vec<Entrant> = (0..5)
        .map(|i| labelled(&format!("Thief{i}"), builtin::eager_thief()))
        .collect();
    let config = TournamentConfig::default()
        .with_game_size(3)
        .with_pool_games(4)
        .with_max_final_games(2)
        .with_seed(17);

    let mut sink = RecordingSink::new();
    let report = Tournament::new(roster, config).unwrap().run(&mut sink).unwrap();

    let pool = report.pool.expect("pool stage should run");
    assert_eq!(pool.finalists.len(), 3);
    assert_eq!(pool.games_played.len(), 5);
    assert!(pool.standings.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(pool.finalists, pool.standings.iter().take(3).map(|s| s.entrant).collect::<Vec<_>>());

    assert_eq!(sink.events().iter().filter(|e| matches!(e, Event::PoolRoundStarted { .. })).count(), 4);
    assert_eq!(sink.events().iter().filter(|e| matches!(e, Event::GamesPlayed { .. })).count(), 5);
    assert!(report.final_games <= 2);
}

#[test]
fn test_early_final_stop() {
    let config = TournamentConfig::default()
        .with_game_size(2)
        .with_required_lead(10)
        .with_seed(3);
    let tournament = Tournament::new(vec![quick_thief(), builtin::coward()], config).unwrap();
    let report = tournament.run(&mut NullSink).unwrap();

    // Each game the thief scores 2 and the coward 0.
    assert_eq!(report.final_games, 5);
    assert_eq!(report.outcome, TournamentOutcome::Decided { winner: 0, lead: 10 });
    assert_eq!(report.top_label(), Some("QuickThief"));
    assert_eq!(report.finals[0].score, 10);
    assert!((report.finals[0].mean - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_abort_with_one_scoring_finalist() {
    let mut sink = RecordingSink::new();
    let report = Tournament::new(vec![quick_thief()], TournamentConfig::default())
        .unwrap()
        .run(&mut sink)
        .unwrap();

    assert_eq!(report.outcome, TournamentOutcome::Aborted);
    assert_eq!(report.final_games, 0);
    assert!(sink.events().contains(&Event::InsufficientCompetitors));
    assert!(sink.events().contains(&Event::PaddedWithBaseline { seats: 9 }));
    assert_eq!(sink.of_class(EventClass::Winner).count(), 0);
}

#[test]
fn test_padding_baseline_never_scores() {
    let config = TournamentConfig::default()
        .with_game_size(4)
        .with_max_final_games(3)
        .with_required_lead(1_000);
    let roster = vec![quick_thief(), builtin::coward()];
    let mut sink = RecordingSink::new();
    let report = Tournament::new(roster, config).unwrap().run(&mut sink).unwrap();

    assert_eq!(report.final_games, 3);
    assert_eq!(report.finals.len(), 2, "only roster entrants are scored");
    assert!(matches!(report.outcome, TournamentOutcome::Inconclusive { .. }));
    assert!(sink.events().contains(&Event::PaddedWithBaseline { seats: 2 }));

    let drunkards_seated = sink
        .events()
        .iter()
        .filter(|e| matches!(e, Event::Competitor { player } if player.name.ends_with("(Drunkard)")))
        .count();
    assert_eq!(drunkards_seated, 6);
}

#[test]
fn test_tournament_is_reproducible() {
    let roster = || -> Vec<Entrant> {
        (0..12)
            .map(|i| match i % 3 {
                0 => labelled(&format!("Thief{i}"), builtin::eager_thief()),
                1 => labelled(&format!("Greedy{i}"), builtin::greedy_bastard()),
                _ => labelled(&format!("Drunk{i}"), builtin::eager_thief()),
            })
            .collect()
    };
    let config = TournamentConfig::default()
        .with_game_size(4)
        .with_pool_games(3)
        .with_max_final_games(5)
        .with_seed(42)
        .with_game(GameConfig::default().with_starting_stamina(300));

    let a = Tournament::new(roster(), config.clone()).unwrap().run(&mut NullSink).unwrap();
    let b = Tournament::new(roster(), config).unwrap().run(&mut NullSink).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_custom_baseline() {
    let config = TournamentConfig::default().with_game_size(3).with_max_final_games(1);
    let report = Tournament::new(vec![quick_thief(), builtin::coward()], config)
        .unwrap()
        .with_baseline(builtin::chad())
        .run(&mut NullSink)
        .unwrap();
    assert_eq!(report.final_games, 1);
    assert_eq!(report.finals.len(), 2);
}
