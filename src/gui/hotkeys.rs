//! キーボードショートカット
//!
//! Dioxusのキーイベントに依存しない形でキー入力を表し、
//! どの操作に対応するかだけを判定する。

use crate::gui::models::FocusTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyName {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: KeyName,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyStroke {
    pub fn plain(key: KeyName) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    pub fn ctrl(key: KeyName) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    fn is_ctrl_char(&self, expected: char) -> bool {
        match self.key {
            KeyName::Char(c) => {
                self.ctrl && !self.shift && !self.alt && c.eq_ignore_ascii_case(&expected)
            }
            _ => false,
        }
    }
}

/// ショートカットで起動する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    PasteToQuestion,
    CopyResponse,
    SubmitTicket,
}

/// 判定に必要な画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HotkeyContext {
    pub modal_open: bool,
    pub focus: Option<FocusTarget>,
}

/// ページ全体のショートカット判定。Someのときはブラウザ既定動作を抑止する
pub fn resolve_global(stroke: &KeyStroke, context: &HotkeyContext) -> Option<HotkeyAction> {
    if context.modal_open {
        return None;
    }

    let in_response_field = context.focus == Some(FocusTarget::SuggestedResponse);

    // 回答欄では通常のコピー&ペーストを優先する
    if stroke.is_ctrl_char('v') {
        return (!in_response_field).then_some(HotkeyAction::PasteToQuestion);
    }

    if stroke.is_ctrl_char('c') {
        return (!in_response_field).then_some(HotkeyAction::CopyResponse);
    }

    if stroke.ctrl && stroke.key == KeyName::Enter {
        return Some(HotkeyAction::SubmitTicket);
    }

    None
}

/// 問い合わせ入力欄での送信判定（Enter、Shift+Enterは改行）
pub fn is_input_submit(stroke: &KeyStroke) -> bool {
    stroke.key == KeyName::Enter && !stroke.shift
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_page() -> HotkeyContext {
        HotkeyContext::default()
    }

    #[test]
    fn test_global_shortcuts() {
        let ctx = open_page();
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Char('v')), &ctx),
            Some(HotkeyAction::PasteToQuestion)
        );
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Char('c')), &ctx),
            Some(HotkeyAction::CopyResponse)
        );
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Enter), &ctx),
            Some(HotkeyAction::SubmitTicket)
        );
        assert_eq!(
            resolve_global(&KeyStroke::plain(KeyName::Char('v')), &ctx),
            None
        );
        assert_eq!(resolve_global(&KeyStroke::plain(KeyName::Enter), &ctx), None);
    }

    #[test]
    fn test_modifiers_exclude_clipboard_shortcuts() {
        let ctx = open_page();
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Char('v')).with_shift(), &ctx),
            None
        );
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Char('c')).with_alt(), &ctx),
            None
        );
        // Ctrl+Shift+Enter でも送信する
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Enter).with_shift(), &ctx),
            Some(HotkeyAction::SubmitTicket)
        );
    }

    #[test]
    fn test_modal_blocks_all_shortcuts() {
        let ctx = HotkeyContext {
            modal_open: true,
            focus: None,
        };
        assert_eq!(resolve_global(&KeyStroke::ctrl(KeyName::Char('v')), &ctx), None);
        assert_eq!(resolve_global(&KeyStroke::ctrl(KeyName::Enter), &ctx), None);
    }

    #[test]
    fn test_response_field_keeps_native_clipboard() {
        let ctx = HotkeyContext {
            modal_open: false,
            focus: Some(FocusTarget::SuggestedResponse),
        };
        assert_eq!(resolve_global(&KeyStroke::ctrl(KeyName::Char('v')), &ctx), None);
        assert_eq!(resolve_global(&KeyStroke::ctrl(KeyName::Char('c')), &ctx), None);
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Enter), &ctx),
            Some(HotkeyAction::SubmitTicket)
        );
    }

    #[test]
    fn test_input_submit() {
        assert!(is_input_submit(&KeyStroke::plain(KeyName::Enter)));
        assert!(is_input_submit(&KeyStroke::ctrl(KeyName::Enter)));
        assert!(!is_input_submit(&KeyStroke::plain(KeyName::Enter).with_shift()));
        assert!(!is_input_submit(&KeyStroke::plain(KeyName::Char('a'))));
    }
}
