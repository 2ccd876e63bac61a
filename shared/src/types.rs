use serde::{Deserialize, Serialize};

/// Axis-aligned box in image pixel coordinates: `[x1, y1, x2, y2]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoundingBox(pub [f32; 4]);

impl BoundingBox {
    /// A box is well-formed when its top-left corner is at or above-left of
    /// its bottom-right corner.
    pub fn is_valid(&self) -> bool {
        let [x1, y1, x2, y2] = self.0;
        x1 <= x2 && y1 <= y2
    }
}

/// One classified region in a prediction response.
///
/// Older backend builds emitted the label under `class` instead of
/// `class_name`; we read both but `class_name` is canonical.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Detection {
    #[serde(alias = "class")]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u32>,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PrimaryDetection {
    pub disease: String,
    pub confidence: f32,
}

/// Response body of `POST /api/predict/upload`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_detection: Option<PrimaryDetection>,
    #[serde(default)]
    pub predictions: Vec<Detection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub disease: String,
    pub date: String,
    pub confidence: f32,
}

/// Response body of `GET /api/predict/history`. Entries arrive most recent
/// first; the client preserves whatever order the backend sent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Response body of `GET /api/predict/stats`.
///
/// `total_scans` was the field name in the first backend revision; it is
/// accepted as an alias of the canonical `total_predictions`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StatsSnapshot {
    #[serde(alias = "total_scans", default)]
    pub total_predictions: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_common_disease: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_common_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diseases_detected: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Response body of `GET /api/auth/profile`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileResponse {
    pub user: ProfileUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_validity() {
        assert!(BoundingBox([10.0, 20.0, 30.0, 40.0]).is_valid());
        assert!(BoundingBox([10.0, 20.0, 10.0, 20.0]).is_valid());
        assert!(!BoundingBox([30.0, 20.0, 10.0, 40.0]).is_valid());
        assert!(!BoundingBox([10.0, 40.0, 30.0, 20.0]).is_valid());
    }

    #[test]
    fn detection_reads_class_alias() {
        let legacy: Detection =
            serde_json::from_str(r#"{"class": "mel", "confidence": 0.91}"#).unwrap();
        assert_eq!(legacy.class_name, "mel");
        assert_eq!(legacy.class_id, None);
        assert_eq!(legacy.bbox, None);

        let current: Detection = serde_json::from_str(
            r#"{"class_name": "nv", "class_id": 5, "confidence": 0.4, "bbox": [1.0, 2.0, 3.0, 4.0]}"#,
        )
        .unwrap();
        assert_eq!(current.class_name, "nv");
        assert_eq!(current.class_id, Some(5));
        assert!(current.bbox.unwrap().is_valid());
    }

    #[test]
    fn stats_reads_total_scans_alias() {
        let legacy: StatsSnapshot =
            serde_json::from_str(r#"{"total_scans": 3, "diseases_detected": 2}"#).unwrap();
        assert_eq!(legacy.total_predictions, 3);
        assert_eq!(legacy.diseases_detected, Some(2));

        let current: StatsSnapshot = serde_json::from_str(
            r#"{"total_predictions": 7, "most_common_disease": "nv", "most_common_count": 4}"#,
        )
        .unwrap();
        assert_eq!(current.total_predictions, 7);
        assert_eq!(current.most_common_disease.as_deref(), Some("nv"));
    }

    #[test]
    fn prediction_response_tolerates_missing_optionals() {
        let resp: PredictionResponse =
            serde_json::from_str(r#"{"predictions": []}"#).unwrap();
        assert!(resp.message.is_empty());
        assert!(resp.predictions.is_empty());
        assert!(resp.primary_detection.is_none());
        assert!(resp.visualization_url.is_none());
    }
}
