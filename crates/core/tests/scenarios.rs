use dungeon_core::mapgen::{Room, populate, populate_with_summary};
use dungeon_core::{Coord, PopulationPolicy, RewardKind};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

/// A 6x4 room at the position an 8x6 partition with a one-cell inset would carve.
fn inset_room(difficulty: f32, reward: f32) -> Room {
    Room::rectangular(Coord::new(1, 1), 6, 4, difficulty, reward)
}

#[test]
fn test_single_partition_scenario_places_hazards_and_coin_floor() {
    let policy = PopulationPolicy::default();

    for seed in 0..50 {
        let mut room = inset_room(0.5, 0.5);
        room.add_entrance(Coord::new(1, 2));

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (contents, summary) = populate_with_summary(&room, &policy, &mut rng);

        assert_eq!(summary.placeable, 20, "entrance and its buffer are never placeable");
        assert!(!contents.dangers().is_empty(), "seed {seed} placed no dangers");
        assert!(
            contents.count_rewards(RewardKind::Coin) >= 2,
            "seed {seed} placed fewer than two coins"
        );
        assert!(!contents.dangers().contains_key(&Coord::new(1, 2)));
    }
}

#[test]
fn test_sealed_room_is_always_empty() {
    let policy = PopulationPolicy::default();

    for (difficulty, reward) in [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (1.0, 0.0)] {
        let room = inset_room(difficulty, reward);
        assert!(room.entrances().is_empty());

        for seed in 0..10 {
            let contents = populate(&room, &policy, &mut ChaCha8Rng::seed_from_u64(seed));
            assert!(contents.dangers().is_empty());
            assert!(contents.rewards().is_empty());
        }
    }
}

#[test]
fn test_room_without_tiles_is_left_alone() {
    let mut room = Room::new(Coord::new(0, 0), 5, 5, 1.0, 1.0);
    room.add_entrance(Coord::new(0, 0));

    let contents =
        populate(&room, &PopulationPolicy::default(), &mut ChaCha8Rng::seed_from_u64(3));

    assert!(room.entrances().is_empty(), "non-tiles cannot become entrances");
    assert!(contents.is_empty());
}

#[test]
fn test_doubling_difficulty_never_reduces_danger_count() {
    let policy = PopulationPolicy::default();
    let build = |difficulty: f32| {
        let mut room = Room::rectangular(Coord::new(0, 0), 12, 9, difficulty, 0.5);
        room.add_entrance(Coord::new(0, 4));
        room.add_entrance(Coord::new(11, 4));
        room
    };

    for difficulty in [0.05_f32, 0.1, 0.2, 0.3, 0.45, 0.5] {
        for seed in 0..10 {
            let low = populate(&build(difficulty), &policy, &mut ChaCha8Rng::seed_from_u64(seed));
            let high =
                populate(&build(difficulty * 2.0), &policy, &mut ChaCha8Rng::seed_from_u64(seed));
            assert!(
                high.dangers().len() >= low.dangers().len(),
                "difficulty {difficulty} seed {seed}: {} dangers dropped to {}",
                low.dangers().len(),
                high.dangers().len()
            );
        }
    }
}

#[test]
fn test_influence_pass_is_strictly_additive() {
    let mut with_bonus = PopulationPolicy::default();
    with_bonus.influence.enabled = true;
    let mut without_bonus = with_bonus.clone();
    without_bonus.influence.enabled = false;

    for seed in 0..20 {
        let mut room = Room::rectangular(Coord::new(0, 0), 14, 10, 0.9, 0.9);
        room.add_entrance(Coord::new(0, 5));
        room.add_entrance(Coord::new(7, 9));

        let plain = populate(&room, &without_bonus, &mut ChaCha8Rng::seed_from_u64(seed));
        let boosted = populate(&room, &with_bonus, &mut ChaCha8Rng::seed_from_u64(seed));

        assert_eq!(plain.dangers(), boosted.dangers());
        for (pos, kind) in plain.rewards() {
            assert_eq!(boosted.rewards().get(pos), Some(kind));
        }
        assert!(boosted.rewards().len() >= plain.rewards().len());
    }
}
