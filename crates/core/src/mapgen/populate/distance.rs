//! Breadth-first distance fields and entrance-to-entrance safe paths.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::types::Coord;

use super::super::room::Room;

/// Hop count from the nearest entrance for every tile reachable from one.
pub fn distance_field(room: &Room) -> BTreeMap<Coord, u32> {
    let mut distances: BTreeMap<Coord, u32> =
        room.entrances().iter().map(|&entrance| (entrance, 0)).collect();
    let mut open: VecDeque<Coord> = room.entrances().iter().copied().collect();

    while let Some(pos) = open.pop_front() {
        let distance = distances[&pos];
        for next in room.tile_neighbors(pos) {
            if distances.contains_key(&next) {
                continue;
            }
            distances.insert(next, distance + 1);
            open.push_back(next);
        }
    }
    distances
}

/// One shortest tile path from `start` to `goal`, both ends included. Empty
/// when the goal cannot be reached.
pub(crate) fn shortest_path(room: &Room, start: Coord, goal: Coord) -> Vec<Coord> {
    let mut came_from: BTreeMap<Coord, Option<Coord>> = BTreeMap::from([(start, None)]);
    let mut open = VecDeque::from([start]);

    while let Some(pos) = open.pop_front() {
        if pos == goal {
            break;
        }
        for next in room.tile_neighbors(pos) {
            if came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, Some(pos));
            open.push_back(next);
        }
    }

    if !came_from.contains_key(&goal) {
        return Vec::new();
    }
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&Some(previous)) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Union of one shortest path between every pair of entrances plus a one-tile
/// buffer around them. A room with a single entrance protects that entrance
/// and its neighbours.
pub fn safe_path_network(room: &Room) -> BTreeSet<Coord> {
    let entrances: Vec<Coord> = room.entrances().iter().copied().collect();
    let mut spine = BTreeSet::new();

    if let [only] = entrances.as_slice() {
        spine.insert(*only);
    }
    for (index, &start) in entrances.iter().enumerate() {
        for &goal in &entrances[index + 1..] {
            spine.extend(shortest_path(room, start, goal));
        }
    }

    let mut safe = spine.clone();
    for &tile in &spine {
        safe.extend(room.tile_neighbors(tile));
    }
    safe
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_room(width: usize, height: usize) -> Room {
        Room::rectangular(Coord::new(0, 0), width, height, 0.5, 0.5)
    }

    #[test]
    fn distance_field_is_multi_source() {
        let mut room = strip_room(7, 1);
        room.add_entrance(Coord::new(0, 0));
        room.add_entrance(Coord::new(6, 0));

        let distances = distance_field(&room);

        assert_eq!(distances[&Coord::new(0, 0)], 0);
        assert_eq!(distances[&Coord::new(2, 0)], 2);
        assert_eq!(distances[&Coord::new(3, 0)], 3);
        assert_eq!(distances[&Coord::new(5, 0)], 1);
    }

    #[test]
    fn disconnected_tiles_are_left_out_of_the_distance_field() {
        let mut grid = crate::mapgen::grid::Grid::new(3, 5);
        for x in [0, 1, 3, 4] {
            grid.set(Coord::new(x, 1), crate::types::CellKind::Room);
        }
        let mut room = Room::new(Coord::new(0, 0), 5, 3, 0.5, 0.5);
        room.read_tiles(&grid);
        room.add_entrance(Coord::new(0, 1));

        let distances = distance_field(&room);

        assert_eq!(distances.len(), 2);
        assert!(!distances.contains_key(&Coord::new(3, 1)));
    }

    #[test]
    fn shortest_path_links_both_ends_with_minimal_length() {
        let room = strip_room(5, 4);
        let path = shortest_path(&room, Coord::new(0, 0), Coord::new(4, 3));

        assert_eq!(path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(4, 3)));
        assert_eq!(path.len(), 8);
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn safe_network_covers_path_and_buffer() {
        let mut room = strip_room(6, 5);
        room.add_entrance(Coord::new(0, 2));
        room.add_entrance(Coord::new(5, 2));

        let safe = safe_path_network(&room);

        for x in 0..6 {
            for y in 1..=3 {
                assert!(safe.contains(&Coord::new(x, y)), "({x}, {y}) should be protected");
            }
            assert!(!safe.contains(&Coord::new(x, 0)));
            assert!(!safe.contains(&Coord::new(x, 4)));
        }
    }

    #[test]
    fn single_entrance_protects_its_neighbourhood() {
        let mut room = strip_room(4, 4);
        room.add_entrance(Coord::new(0, 1));

        let safe = safe_path_network(&room);

        let expected: BTreeSet<_> =
            [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 1)]
                .into_iter()
                .collect();
        assert_eq!(safe, expected);
    }
}
