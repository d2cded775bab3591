use super::*;
use crate::ui::components::popup::help_row_count;
use crate::ui::components::{ConfirmPurpose, InputPurpose, ListPurpose};
use crossterm::event::{KeyCode, KeyModifiers};

/// 팝업 키 처리 결과
enum PopupOutcome {
    /// 팝업 유지
    Keep,
    /// 팝업 닫기
    Close,
    /// 입력 확정
    SubmitInput(String, InputPurpose),
    /// 확인 버튼
    Confirm(ConfirmPurpose),
    /// 목록 항목 선택
    Choose(usize, ListPurpose),
    /// 북마크 삭제
    RemoveBookmark(usize),
}

impl App {
    pub fn is_popup_active(&self) -> bool {
        self.popup.is_some()
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    /// 팝업 모드 키 처리
    pub fn handle_popup_key(&mut self, modifiers: KeyModifiers, code: KeyCode) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };

        let outcome = match popup {
            PopupKind::Input { input, purpose, .. } => match (modifiers, code) {
                (_, KeyCode::Enter) => PopupOutcome::SubmitInput(input.value().to_string(), purpose.clone()),
                (_, KeyCode::Esc) => PopupOutcome::Close,
                (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                    input.delete_prev_word();
                    PopupOutcome::Keep
                }
                (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                    input.clear();
                    PopupOutcome::Keep
                }
                (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                    input.insert_char(c);
                    PopupOutcome::Keep
                }
                (_, KeyCode::Backspace) => {
                    input.backspace();
                    PopupOutcome::Keep
                }
                (_, KeyCode::Delete) => {
                    input.delete();
                    PopupOutcome::Keep
                }
                (_, KeyCode::Left) => {
                    input.left();
                    PopupOutcome::Keep
                }
                (_, KeyCode::Right) => {
                    input.right();
                    PopupOutcome::Keep
                }
                (_, KeyCode::Home) => {
                    input.home();
                    PopupOutcome::Keep
                }
                (_, KeyCode::End) => {
                    input.end();
                    PopupOutcome::Keep
                }
                _ => PopupOutcome::Keep,
            },
            PopupKind::Confirm {
                selected_button,
                purpose,
                ..
            } => match code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                    *selected_button = 1 - (*selected_button).min(1);
                    PopupOutcome::Keep
                }
                KeyCode::Enter if *selected_button == 0 => PopupOutcome::Confirm(purpose.clone()),
                KeyCode::Char('y') => PopupOutcome::Confirm(purpose.clone()),
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n') => PopupOutcome::Close,
                _ => PopupOutcome::Keep,
            },
            PopupKind::List {
                items,
                selected_index,
                purpose,
                ..
            } => match code {
                KeyCode::Char('j') | KeyCode::Down => {
                    if *selected_index + 1 < items.len() {
                        *selected_index += 1;
                    }
                    PopupOutcome::Keep
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    *selected_index = selected_index.saturating_sub(1);
                    PopupOutcome::Keep
                }
                KeyCode::Enter if !items.is_empty() => PopupOutcome::Choose(*selected_index, purpose.clone()),
                KeyCode::Delete | KeyCode::Char('d') if matches!(purpose, ListPurpose::Bookmarks) => {
                    PopupOutcome::RemoveBookmark(*selected_index)
                }
                KeyCode::Esc | KeyCode::Char('q') => PopupOutcome::Close,
                _ => PopupOutcome::Keep,
            },
            PopupKind::Help { scroll_offset } => match code {
                KeyCode::Char('j') | KeyCode::Down => {
                    if *scroll_offset + 1 < help_row_count() {
                        *scroll_offset += 1;
                    }
                    PopupOutcome::Keep
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    *scroll_offset = scroll_offset.saturating_sub(1);
                    PopupOutcome::Keep
                }
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Enter => {
                    PopupOutcome::Close
                }
                _ => PopupOutcome::Keep,
            },
            PopupKind::Message { .. } => match code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => PopupOutcome::Close,
                _ => PopupOutcome::Keep,
            },
        };

        match outcome {
            PopupOutcome::Keep => {}
            PopupOutcome::Close => self.close_popup(),
            PopupOutcome::SubmitInput(value, purpose) => {
                self.close_popup();
                self.confirm_input(&value, purpose);
            }
            PopupOutcome::Confirm(purpose) => {
                self.close_popup();
                self.confirm_action(purpose);
            }
            PopupOutcome::Choose(index, purpose) => {
                self.close_popup();
                self.choose_list_item(index, purpose);
            }
            PopupOutcome::RemoveBookmark(index) => self.remove_bookmark(index),
        }
    }

    /// 목록 팝업 선택 처리
    fn choose_list_item(&mut self, index: usize, purpose: ListPurpose) {
        match purpose {
            ListPurpose::Bookmarks => {
                let Some(bookmark) = self.bookmarks.get(index).cloned() else {
                    return;
                };
                if self.change_folder(self.active_panel, VfsPath::Local(bookmark.path)) {
                    self.set_toast(&format!("Bookmark: {}", bookmark.name));
                }
            }
            ListPurpose::Themes(ids) => {
                if let Some((theme_type, name)) = ids.get(index).cloned() {
                    self.apply_theme(theme_type, name.as_deref());
                }
            }
        }
    }
}
