use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{HotelId, HotelRating, Price, ValidationError};

/// Hotel集約
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub hotel_id: HotelId,
    pub name: String,
    pub location: String,
    /// 1泊あたりの料金
    pub price: Price,
    pub rating: HotelRating,
    pub description: String,
    pub image_url: Option<String>,
    pub features: BTreeSet<String>,
}

/// ホテル登録の入力（IDは採番前）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// ホテル更新の入力（部分更新）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    /// Some(None) で画像を削除する
    #[serde(default, with = "super::double_option")]
    pub image_url: Option<Option<String>>,
    pub features: Option<Vec<String>>,
}

/// ホテル検索条件
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HotelFilter {
    /// 所在地の部分一致（大文字小文字を区別しない）
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    /// すべて備えているホテルのみ
    #[serde(default)]
    pub features: Vec<String>,
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value.to_string())
}

/// 設備タグを正規化する（前後空白の除去、空要素の除外、重複排除）
pub fn normalize_features<I, S>(features: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    features
        .into_iter()
        .map(|f| f.as_ref().trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// 純粋関数：ホテルを作成する
///
/// ビジネスルール：
/// - 名前と所在地は必須
/// - 料金は0以上
/// - 評価は0〜5
pub fn create_hotel(input: NewHotel) -> Result<Hotel, ValidationError> {
    Ok(Hotel {
        hotel_id: HotelId::new(),
        name: required(&input.name, "name")?,
        location: required(&input.location, "location")?,
        price: Price::try_from(input.price)?,
        rating: HotelRating::try_from(input.rating)?,
        description: input.description.trim().to_string(),
        image_url: input.image_url.filter(|s| !s.trim().is_empty()),
        features: normalize_features(input.features),
    })
}

/// 純粋関数：部分更新を適用する
///
/// 指定された項目のみ置き換える。どれか1つでも不正なら全体を拒否する。
pub fn apply_patch(hotel: &Hotel, patch: HotelPatch) -> Result<Hotel, ValidationError> {
    let mut updated = hotel.clone();

    if let Some(name) = patch.name {
        updated.name = required(&name, "name")?;
    }
    if let Some(location) = patch.location {
        updated.location = required(&location, "location")?;
    }
    if let Some(price) = patch.price {
        updated.price = Price::try_from(price)?;
    }
    if let Some(rating) = patch.rating {
        updated.rating = HotelRating::try_from(rating)?;
    }
    if let Some(description) = patch.description {
        updated.description = description.trim().to_string();
    }
    if let Some(image_url) = patch.image_url {
        updated.image_url = image_url.filter(|s| !s.trim().is_empty());
    }
    if let Some(features) = patch.features {
        updated.features = normalize_features(features);
    }

    Ok(updated)
}

impl HotelFilter {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        if let Some(location) = &self.location {
            let needle = location.trim().to_lowercase();
            if !hotel.location.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| hotel.price.value() < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| hotel.price.value() > max) {
            return false;
        }
        if self
            .min_rating
            .is_some_and(|min| hotel.rating.value() < min)
        {
            return false;
        }
        normalize_features(&self.features)
            .iter()
            .all(|wanted| hotel.features.contains(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_hotel() -> NewHotel {
        NewHotel {
            name: "Riad Atlas".to_string(),
            location: "Marrakech".to_string(),
            price: 100.0,
            rating: 4.5,
            description: "Quiet riad near the medina".to_string(),
            image_url: None,
            features: vec!["Wifi".to_string(), " Spa ".to_string(), "Wifi".to_string()],
        }
    }

    #[test]
    fn test_create_hotel_normalizes_features() {
        let hotel = create_hotel(new_hotel()).unwrap();
        assert_eq!(hotel.price.value(), 100.0);
        assert_eq!(hotel.rating.value(), 4.5);
        assert_eq!(
            hotel.features.iter().cloned().collect::<Vec<_>>(),
            vec!["Spa".to_string(), "Wifi".to_string()]
        );
    }

    #[test]
    fn test_create_hotel_rejects_invalid_ranges() {
        let negative_price = NewHotel {
            price: -5.0,
            ..new_hotel()
        };
        assert_eq!(
            create_hotel(negative_price).unwrap_err(),
            ValidationError::NegativePrice(-5.0)
        );

        let rating_too_high = NewHotel {
            rating: 7.0,
            ..new_hotel()
        };
        assert_eq!(
            create_hotel(rating_too_high).unwrap_err(),
            ValidationError::HotelRatingOutOfRange(7.0)
        );

        let no_name = NewHotel {
            name: " ".to_string(),
            ..new_hotel()
        };
        assert_eq!(
            create_hotel(no_name).unwrap_err(),
            ValidationError::EmptyField("name")
        );
    }

    #[test]
    fn test_apply_patch_merges_only_given_fields() {
        let hotel = create_hotel(new_hotel()).unwrap();
        let patch = HotelPatch {
            price: Some(80.0),
            ..Default::default()
        };

        let updated = apply_patch(&hotel, patch).unwrap();

        assert_eq!(updated.hotel_id, hotel.hotel_id);
        assert_eq!(updated.price.value(), 80.0);
        assert_eq!(updated.name, hotel.name);
        assert_eq!(updated.rating, hotel.rating);
    }

    #[test]
    fn test_apply_patch_is_all_or_nothing() {
        let hotel = create_hotel(new_hotel()).unwrap();
        let patch = HotelPatch {
            name: Some("Renamed".to_string()),
            rating: Some(-1.0),
            ..Default::default()
        };

        assert!(apply_patch(&hotel, patch).is_err());
        assert_eq!(hotel.name, "Riad Atlas");
    }

    #[test]
    fn test_patch_image_url_can_be_replaced_and_cleared() {
        let hotel = create_hotel(NewHotel {
            image_url: Some("https://img/a.jpg".to_string()),
            ..new_hotel()
        })
        .unwrap();

        // 項目なしは維持
        let patch: HotelPatch = serde_json::from_str(r#"{"price":90.0}"#).unwrap();
        assert_eq!(patch.image_url, None);
        let kept = apply_patch(&hotel, patch).unwrap();
        assert_eq!(kept.image_url.as_deref(), Some("https://img/a.jpg"));

        let patch: HotelPatch = serde_json::from_str(r#"{"image_url":"b.jpg"}"#).unwrap();
        let replaced = apply_patch(&kept, patch).unwrap();
        assert_eq!(replaced.image_url.as_deref(), Some("b.jpg"));

        // null は削除
        let patch: HotelPatch = serde_json::from_str(r#"{"image_url":null}"#).unwrap();
        assert_eq!(patch.image_url, Some(None));
        let cleared = apply_patch(&replaced, patch).unwrap();
        assert_eq!(cleared.image_url, None);
    }

    #[test]
    fn test_filter_matches_location_price_and_features() {
        let hotel = create_hotel(new_hotel()).unwrap();

        let by_location = HotelFilter {
            location: Some("marra".to_string()),
            ..Default::default()
        };
        assert!(by_location.matches(&hotel));

        let too_cheap = HotelFilter {
            max_price: Some(50.0),
            ..Default::default()
        };
        assert!(!too_cheap.matches(&hotel));

        let wants_pool = HotelFilter {
            features: vec!["Wifi".to_string(), "Piscine".to_string()],
            ..Default::default()
        };
        assert!(!wants_pool.matches(&hotel));

        let wants_spa = HotelFilter {
            features: vec!["Spa".to_string()],
            min_rating: Some(4.0),
            ..Default::default()
        };
        assert!(wants_spa.matches(&hotel));
    }
}
