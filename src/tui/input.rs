use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::ViewEvent;

use super::app::{Focus, PromptKind, Screen};
use super::edit_buffer::EditBuffer;

/// Route one key press. Returns the controller action it triggers, if any.
pub fn handle_key(screen: &mut Screen, key: KeyEvent) -> Option<ViewEvent> {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('q') {
        screen.should_quit = true;
        return None;
    }

    // Any other key dismisses a notice
    if screen.notice.is_some() {
        screen.notice = None;
        return None;
    }

    if screen.prompt.is_some() {
        return handle_prompt(screen, key);
    }

    match key.code {
        KeyCode::Char('s') if ctrl => {
            screen.open_prompt(PromptKind::Save);
            return None;
        }
        KeyCode::Char('o') if ctrl => {
            screen.open_prompt(PromptKind::Load);
            return None;
        }
        KeyCode::F(1) => return Some(ViewEvent::About),
        KeyCode::Tab | KeyCode::BackTab => {
            screen.toggle_focus();
            return None;
        }
        _ => {}
    }

    match screen.focus {
        Focus::Input => handle_input(screen, key),
        Focus::List => handle_list(screen, key),
    }
}

/// Answer to a yes/no popup, or None for keys that do not answer it
pub fn confirm_answer(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Bracketed paste goes to whichever text field is active
pub fn handle_paste(screen: &mut Screen, text: &str) {
    if let Some(prompt) = screen.prompt.as_mut() {
        prompt.buffer.insert_str(text);
        return;
    }
    if screen.notice.is_some() {
        return;
    }
    screen.focus = Focus::Input;
    screen.input.insert_str(text);
}

fn handle_input(screen: &mut Screen, key: KeyEvent) -> Option<ViewEvent> {
    match key.code {
        KeyCode::Enter => Some(ViewEvent::Add(screen.input.text.clone())),
        KeyCode::Esc => {
            screen.focus = Focus::List;
            None
        }
        KeyCode::Down => {
            screen.focus = Focus::List;
            if screen.selected.is_none() {
                screen.select_first();
            }
            None
        }
        _ => {
            edit_key(&mut screen.input, key);
            None
        }
    }
}

fn handle_list(screen: &mut Screen, key: KeyEvent) -> Option<ViewEvent> {
    let selected = screen.selected;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => screen.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => screen.select_next(),
        KeyCode::Home | KeyCode::Char('g') => screen.select_first(),
        KeyCode::End | KeyCode::Char('G') => screen.select_last(),
        KeyCode::Enter | KeyCode::Char(' ') => return Some(ViewEvent::ToggleCompleted(selected)),
        KeyCode::Char('c') => return Some(ViewEvent::MarkCompleted(selected)),
        KeyCode::Char('a') => return Some(ViewEvent::MarkActive(selected)),
        KeyCode::Char('d') | KeyCode::Delete => return Some(ViewEvent::Delete(selected)),
        KeyCode::Char('?') => return Some(ViewEvent::About),
        KeyCode::Char('i') => screen.focus = Focus::Input,
        KeyCode::Char('q') => screen.should_quit = true,
        KeyCode::Esc => screen.selected = None,
        _ => {}
    }
    None
}

fn handle_prompt(screen: &mut Screen, key: KeyEvent) -> Option<ViewEvent> {
    match key.code {
        KeyCode::Esc => {
            screen.prompt = None;
            None
        }
        KeyCode::Enter => {
            let prompt = screen.prompt.take()?;
            let path = prompt.buffer.text.trim();
            if path.is_empty() {
                return None;
            }
            let path = PathBuf::from(path);
            screen.default_path = path.clone();
            Some(match prompt.kind {
                PromptKind::Save => ViewEvent::Save(path),
                PromptKind::Load => ViewEvent::Load(path),
            })
        }
        _ => {
            if let Some(prompt) = screen.prompt.as_mut() {
                edit_key(&mut prompt.buffer, key);
            }
            None
        }
    }
}

/// Shared single-line editing keys
fn edit_key(buf: &mut EditBuffer, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('a') if ctrl => buf.move_home(),
        KeyCode::Char('e') if ctrl => buf.move_end(),
        KeyCode::Char('w') if ctrl => buf.delete_word_left(),
        KeyCode::Char('u') if ctrl => buf.delete_to_start(),
        KeyCode::Char(c) if !ctrl && !alt => buf.insert_char(c),
        KeyCode::Backspace if alt => buf.delete_word_left(),
        KeyCode::Backspace => buf.backspace(),
        KeyCode::Delete => buf.delete(),
        KeyCode::Left => buf.move_left(),
        KeyCode::Right => buf.move_right(),
        KeyCode::Home => buf.move_home(),
        KeyCode::End => buf.move_end(),
        _ => {}
    }
}
