//! テーマとスタイルヘルパー

use crate::gui::models::ControlState;

/// CSS クラス名の定数
pub struct CssClasses;

impl CssClasses {
    // アプリケーション
    pub const APP: &'static str = "app";
    pub const MAIN_WINDOW: &'static str = "main-window";
    pub const MAIN_CONTENT: &'static str = "main-content";
    pub const LEFT_PANEL: &'static str = "left-panel";
    pub const RIGHT_PANEL: &'static str = "right-panel";
    pub const CARD: &'static str = "card";
    pub const CARD_TITLE: &'static str = "card-title";

    // ヘッダー
    pub const APP_HEADER: &'static str = "app-header";
    pub const APP_TITLE: &'static str = "app-title";
    pub const APP_VERSION: &'static str = "app-version";
    pub const FEEDBACK_OVERVIEW: &'static str = "feedback-overview";
    pub const HOTKEY_HINT: &'static str = "hotkey-hint";

    // モーダル
    pub const MODAL: &'static str = "modal";
    pub const MODAL_CONTENT: &'static str = "modal-content";
    pub const INIT_SUCCESS: &'static str = "init-success";

    // 入力
    pub const FORM_GROUP: &'static str = "form-group";
    pub const FORM_LABEL: &'static str = "form-label";
    pub const FORM_INPUT: &'static str = "form-input";
    pub const TICKET_INPUT: &'static str = "ticket-input";
    pub const RESPONSE_EDITOR: &'static str = "response-editor";

    // ボタン
    pub const BTN: &'static str = "btn";
    pub const BTN_PRIMARY: &'static str = "btn-primary";
    pub const BTN_SECONDARY: &'static str = "btn-secondary";
    pub const BTN_GROUP: &'static str = "btn-group";

    // 状態表示
    pub const LOADING: &'static str = "loading";
    pub const ERROR_MESSAGE: &'static str = "error-message";

    // 結果
    pub const RESULT_GRID: &'static str = "result-grid";
    pub const RESULT_ITEM: &'static str = "result-item";
    pub const RESULT_LABEL: &'static str = "result-label";
    pub const RESULT_VALUE: &'static str = "result-value";
    pub const SUBCATEGORIES_LIST: &'static str = "subcategories-list";
    pub const SUBCATEGORY_ITEM: &'static str = "subcategory-item";
    pub const BADGE: &'static str = "badge";

    // 類似記事
    pub const SOURCES_LIST: &'static str = "sources-list";
    pub const SOURCE_ITEM: &'static str = "source-item";
    pub const SOURCE_CONTENT: &'static str = "source-content";
    pub const SOURCE_SIMILARITY: &'static str = "source-similarity";
    pub const FEEDBACK_INDICATOR: &'static str = "feedback-indicator";
    pub const SOURCE_QUESTION: &'static str = "source-question";
    pub const SOURCE_ANSWER: &'static str = "source-answer";
    pub const SOURCE_FEEDBACK_STATS: &'static str = "source-feedback-stats";

    // トースト
    pub const TOAST_LAYER: &'static str = "toast-layer";
}

/// `active` 修飾子付きのクラス
pub fn active_class(base: &str, active: bool) -> String {
    if active {
        format!("{} active", base)
    } else {
        base.to_string()
    }
}

/// コントロール状態に応じたボタンクラスを取得
pub fn get_button_class(variant: &str, state: &ControlState) -> String {
    let variant_class = match variant {
        "secondary" => CssClasses::BTN_SECONDARY,
        _ => CssClasses::BTN_PRIMARY,
    };

    let mut classes = format!("{} {}", CssClasses::BTN, variant_class);
    if !state.enabled {
        classes.push_str(" disabled");
    }
    classes
}

/// サブカテゴリ一覧のクラス（空ならプレースホルダー表示）
pub fn get_subcategories_class(empty: bool) -> String {
    if empty {
        format!("{} empty", CssClasses::SUBCATEGORIES_LIST)
    } else {
        CssClasses::SUBCATEGORIES_LIST.to_string()
    }
}

/// CSSの埋め込み用ヘルパー
pub fn get_embedded_css() -> &'static str {
    include_str!("theme.css")
}
