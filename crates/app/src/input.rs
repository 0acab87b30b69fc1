//! Raw input events and the key tables that give them meaning.
//! Which table applies depends on the active `UiMode`; this module only classifies keys.

use crawl_core::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEvent {
    Key(Key),
    /// A map cell picked with the mouse (or typed as `@y,x` on the terminal).
    Click(Pos),
}

/// What a key means on the main map screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainCommand {
    Bump { dx: i32, dy: i32 },
    Wait,
    PickUp,
    OpenUseInventory,
    OpenDropInventory,
    Descend,
    Look,
    History,
    CharacterScreen,
    Quit,
}

/// Eight directions: arrows plus Home/End/PageUp/PageDown for diagonals, the vi keys,
/// and the numpad digits.
pub fn direction(key: Key) -> Option<(i32, i32)> {
    Some(match key {
        Key::Up | Key::Char('k') | Key::Char('8') => (0, -1),
        Key::Down | Key::Char('j') | Key::Char('2') => (0, 1),
        Key::Left | Key::Char('h') | Key::Char('4') => (-1, 0),
        Key::Right | Key::Char('l') | Key::Char('6') => (1, 0),
        Key::Home | Key::Char('y') | Key::Char('7') => (-1, -1),
        Key::End | Key::Char('b') | Key::Char('1') => (-1, 1),
        Key::PageUp | Key::Char('u') | Key::Char('9') => (1, -1),
        Key::PageDown | Key::Char('n') | Key::Char('3') => (1, 1),
        _ => return None,
    })
}

pub fn main_command(key: Key) -> Option<MainCommand> {
    if let Some((dx, dy)) = direction(key) {
        return Some(MainCommand::Bump { dx, dy });
    }
    Some(match key {
        Key::Char('.') | Key::Char('5') => MainCommand::Wait,
        Key::Char('g') => MainCommand::PickUp,
        Key::Char('i') => MainCommand::OpenUseInventory,
        Key::Char('d') => MainCommand::OpenDropInventory,
        Key::Char('>') => MainCommand::Descend,
        Key::Char('/') => MainCommand::Look,
        Key::Char('v') => MainCommand::History,
        Key::Char('c') => MainCommand::CharacterScreen,
        Key::Escape => MainCommand::Quit,
        _ => return None,
    })
}

/// Scroll step in the message history viewer.
pub fn history_step(key: Key) -> Option<isize> {
    match key {
        Key::Up | Key::Char('k') => Some(-1),
        Key::Down | Key::Char('j') => Some(1),
        Key::PageUp => Some(-10),
        Key::PageDown => Some(10),
        _ => None,
    }
}

/// `a` selects the first inventory slot, `b` the second, and so on.
pub fn letter_index(key: Key) -> Option<usize> {
    match key {
        Key::Char(c @ 'a'..='z') => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

pub fn is_confirm(key: Key) -> bool {
    matches!(key, Key::Enter)
}

pub fn is_cancel(key: Key) -> bool {
    matches!(key, Key::Escape)
}

/// Parses one terminal line into events. Named keys are written `<up>`, `<enter>` and
/// so on, a click is `@y,x`, an empty line is Enter and every other character is a key.
pub fn parse_line(line: &str) -> Vec<RawEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return vec![RawEvent::Key(Key::Enter)];
    }
    if let Some(pos) = line.strip_prefix('@').and_then(parse_cell) {
        return vec![RawEvent::Click(pos)];
    }

    let mut events = Vec::new();
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
            && let Some(key) = named_key(&rest[1..end])
        {
            events.push(RawEvent::Key(key));
            rest = &rest[end + 1..];
            continue;
        }
        events.push(RawEvent::Key(if c == 'Q' { Key::Escape } else { Key::Char(c) }));
        rest = &rest[c.len_utf8()..];
    }
    events
}

fn named_key(name: &str) -> Option<Key> {
    Some(match name {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "home" => Key::Home,
        "end" => Key::End,
        "pgup" => Key::PageUp,
        "pgdn" => Key::PageDown,
        "enter" => Key::Enter,
        "esc" => Key::Escape,
        _ => return None,
    })
}

fn parse_cell(text: &str) -> Option<Pos> {
    let (y, x) = text.split_once(',')?;
    Some(Pos { y: y.trim().parse().ok()?, x: x.trim().parse().ok()? })
}
