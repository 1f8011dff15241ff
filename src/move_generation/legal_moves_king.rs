use crate::game_state::chess_types::GridLocation;

pub fn king_can_reach(from: GridLocation, to: GridLocation) -> bool {
    (to.0 - from.0).abs() <= 1 && (to.1 - from.1).abs() <= 1
}

#[cfg(test)]
mod tests {
    use super::king_can_reach;

    #[test]
    fn one_step_any_direction() {
        assert!(king_can_reach((7, 4), (6, 3)));
        assert!(king_can_reach((7, 4), (7, 5)));
        assert!(!king_can_reach((7, 4), (7, 6)));
        assert!(!king_can_reach((7, 4), (5, 4)));
    }
}
