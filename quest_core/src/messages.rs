//! User-facing status line and localised rank titles.

use board_rules::{Language, RulesError};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Start node text for a Japanese board.
pub const JA_START_TITLE: &str = "旅の始まり";
pub const JA_START_DESCRIPTION: &str =
    "ここから生産性の冒険が始まります。このタスクを完了して、未知の領域を開拓しましょう。";

const RANK_TITLES_EN: [&str; 6] = [
    "Novice Planner",
    "Apprentice Executer",
    "Journeyman Doer",
    "Expert Manager",
    "Master Strategist",
    "Grandmaster Visionary",
];

const RANK_TITLES_JA: [&str; 6] = [
    "見習い冒険者",
    "駆け出し実行者",
    "熟練の仕事人",
    "熟達の管理者",
    "戦略の達人",
    "伝説の先導者",
];

/// Rank title for a level. Levels past the table keep the last title.
pub fn rank_title(level: u32, language: Language) -> &'static str {
    let titles = match language {
        Language::En => &RANK_TITLES_EN,
        Language::Ja => &RANK_TITLES_JA,
    };
    let index = (level.max(1) as usize - 1).min(titles.len() - 1);
    titles[index]
}

/// The single status line shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum StatusMessage {
    #[default]
    Ready,
    Scanning,
    NewPaths,
    NoViablePaths,
    ScanFailed,
    TooFar,
    Locked,
    TaskCompleted,
    LevelUp(u32),
    Designing,
    CampaignCreated,
    CampaignFailed,
    Saved,
    SaveFailed,
    Loaded,
    LoadFailed,
    Busy,
    /// A rule refused the action; carries the reason.
    Rejected(String),
    /// Generated flavor text, shown verbatim.
    Flavor(String),
}

impl StatusMessage {
    /// Map an error to the message the player sees.
    pub fn from_error(error: &SessionError) -> Self {
        match error {
            SessionError::Busy => StatusMessage::Busy,
            SessionError::Rules(e) => Self::from_rules_error(e),
            SessionError::Generation(_) => StatusMessage::ScanFailed,
            SessionError::Persist(_) => StatusMessage::LoadFailed,
        }
    }

    pub fn from_rules_error(error: &RulesError) -> Self {
        match error {
            RulesError::NotAdjacent { .. } => StatusMessage::TooFar,
            RulesError::Locked { .. } => StatusMessage::Locked,
            RulesError::NoViablePaths(_) => StatusMessage::NoViablePaths,
            other => StatusMessage::Rejected(other.to_string()),
        }
    }

    /// Display text in the given language.
    pub fn text(&self, language: Language) -> String {
        let ja = language == Language::Ja;
        let pick = |en: &str, jp: &str| if ja { jp.to_string() } else { en.to_string() };
        match self {
            StatusMessage::Ready => pick("Ready for adventure.", "冒険の準備完了。"),
            StatusMessage::Scanning => pick("Scanning surrounding sectors...", "周辺エリアをスキャン中..."),
            StatusMessage::NewPaths => pick("New paths revealed!", "新しい経路が判明！"),
            StatusMessage::NoViablePaths => pick("No viable paths found nearby.", "近くに経路が見つかりません。"),
            StatusMessage::ScanFailed => pick("Scan failed.", "スキャン失敗。"),
            StatusMessage::TooFar => pick("Too far to travel. Move closer.", "遠すぎます。近くに移動してください。"),
            StatusMessage::Locked => pick("The way is sealed.", "道は封印されています。"),
            StatusMessage::TaskCompleted => pick("Quest complete!", "クエスト達成！"),
            StatusMessage::LevelUp(level) => {
                if ja {
                    format!("レベルアップ！ Lv {level}")
                } else {
                    format!("Level up! LVL {level}")
                }
            }
            StatusMessage::Designing => pick("Designing campaign...", "キャンペーンを設計中..."),
            StatusMessage::CampaignCreated => pick("Campaign created!", "キャンペーンを作成しました！"),
            StatusMessage::CampaignFailed => pick("Campaign design failed.", "キャンペーン作成に失敗しました。"),
            StatusMessage::Saved => pick("Progress saved.", "進行状況を保存しました。"),
            StatusMessage::SaveFailed => pick("Failed to save data.", "データの保存に失敗しました。"),
            StatusMessage::Loaded => pick("Progress loaded.", "進行状況を読み込みました。"),
            StatusMessage::LoadFailed => pick("Failed to load data.", "データの読み込みに失敗しました。"),
            StatusMessage::Busy => pick("Still working on the last request.", "前のリクエストを処理中です。"),
            StatusMessage::Rejected(reason) => reason.clone(),
            StatusMessage::Flavor(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistError;
    use board_rules::NodeId;

    #[test]
    fn test_rank_title_clamps() {
        assert_eq!(rank_title(1, Language::En), "Novice Planner");
        assert_eq!(rank_title(2, Language::Ja), "駆け出し実行者");
        assert_eq!(rank_title(6, Language::En), "Grandmaster Visionary");
        assert_eq!(rank_title(40, Language::En), "Grandmaster Visionary");
        assert_eq!(rank_title(0, Language::En), "Novice Planner");
    }

    #[test]
    fn test_error_mapping() {
        let too_far = SessionError::Rules(RulesError::NotAdjacent {
            from: NodeId::start(),
            to: NodeId::from("far"),
        });
        assert_eq!(StatusMessage::from_error(&too_far), StatusMessage::TooFar);

        let exhausted = SessionError::Rules(RulesError::NoViablePaths(NodeId::start()));
        assert_eq!(StatusMessage::from_error(&exhausted), StatusMessage::NoViablePaths);

        let missing = SessionError::Persist(PersistError::Missing("save".into()));
        assert_eq!(StatusMessage::from_error(&missing), StatusMessage::LoadFailed);

        let gm = SessionError::Rules(RulesError::gm_only("edit node"));
        assert!(matches!(StatusMessage::from_error(&gm), StatusMessage::Rejected(_)));
    }

    #[test]
    fn test_localised_text() {
        assert_eq!(StatusMessage::NewPaths.text(Language::En), "New paths revealed!");
        assert_eq!(StatusMessage::ScanFailed.text(Language::Ja), "スキャン失敗。");
        assert_eq!(StatusMessage::LevelUp(3).text(Language::En), "Level up! LVL 3");
        assert_eq!(
            StatusMessage::Flavor("Onward".into()).text(Language::Ja),
            "Onward"
        );
    }
}
