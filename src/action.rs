use crate::board::Configuration;

/// Direction the blank travels in one slide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_ACTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

impl Action {
    /// Row and column displacement of the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Action {
        match self {
            Action::Up => Action::Down,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
            Action::Right => Action::Left,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Action::Up => 'U',
            Action::Down => 'D',
            Action::Left => 'L',
            Action::Right => 'R',
        }
    }

    /// The slide that turns `from` into `to`, or `None` when the two boards are not one
    /// legal slide apart.
    ///
    /// The direction comes from the index displacement of the blank: ±1 within a row is a
    /// horizontal slide, ±N is a vertical one.
    pub fn between(from: &Configuration, to: &Configuration) -> Option<Action> {
        let n = from.dimension();
        if to.dimension() != n {
            return None;
        }
        let (a, b) = (from.blank_index(), to.blank_index());
        let action = if b == a + 1 && a / n == b / n {
            Action::Right
        } else if a == b + 1 && a / n == b / n {
            Action::Left
        } else if b == a + n {
            Action::Down
        } else if a == b + n {
            Action::Up
        } else {
            return None;
        };

        let changed = from
            .tiles()
            .iter()
            .zip(to.tiles())
            .filter(|(x, y)| x != y)
            .count();
        (changed == 2 && from.tiles()[b] == to.tiles()[a]).then_some(action)
    }
}

/// Slide directions along a path of configurations, or `None` if any step is illegal.
pub fn actions_from_path(path: &[Configuration]) -> Option<Vec<Action>> {
    path.windows(2)
        .map(|pair| Action::between(&pair[0], &pair[1]))
        .collect()
}

pub fn format_actions(actions: &[Action]) -> String {
    let mut list = vec![];
    let mut i = 0;
    while i < actions.len() {
        let action = actions[i];
        let mut count = 1;
        while i + count < actions.len() && actions[i + count] == action {
            count += 1;
        }
        let str = if count == 1 {
            action.to_char().to_string()
        } else {
            format!("{count}{}", action.to_char())
        };
        list.push(str);
        i += count;
    }

    let mut output = String::new();
    let max_width = list.iter().map(|s| s.len()).max().unwrap_or_default() + 1;
    for chunk in list.chunks(10) {
        for cmd in chunk {
            output.push_str(&format!("{cmd:<width$}", width = max_width));
        }
        output.push('\n');
    }

    output
}
