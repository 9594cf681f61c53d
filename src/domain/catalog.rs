use serde::Deserialize;

use super::hotel::NewHotel;

/// 外部の予約サイト由来のホテル一覧の1件
///
/// review_score は10点満点、facilities はカンマ区切り文字列。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub review_score: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub facilities: String,
}

/// 10点満点のスコアを5段階評価に変換する
///
/// スコア/2 を 1.0〜5.0 に丸め、小数第1位に揃える。
/// スコアがない場合は未評価（0.0）。
pub fn normalize_review_score(score: Option<f64>) -> f64 {
    match score {
        Some(score) if score.is_finite() => {
            let clamped = (score / 2.0).clamp(1.0, 5.0);
            (clamped * 10.0).round() / 10.0
        }
        _ => 0.0,
    }
}

impl CatalogEntry {
    /// ホテル登録の入力に変換する（値の範囲検証は create_hotel で行う）
    pub fn into_new_hotel(self) -> NewHotel {
        NewHotel {
            name: self.name,
            location: self.city,
            price: self.price,
            rating: normalize_review_score(self.review_score),
            description: self.description.unwrap_or_default(),
            image_url: self.image_url.filter(|url| url != "N/A"),
            features: self
                .facilities
                .split(',')
                .map(str::to_string)
                .collect(),
        }
    }
}
