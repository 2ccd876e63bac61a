//! Pure mapping from a prediction response to a displayable result.
//!
//! No I/O happens here; the frontend renders the structures produced by
//! [`ResultView::from_response`] verbatim.

use crate::types::{BoundingBox, PredictionResponse, PrimaryDetection};

/// Static info for one HAM10000 lesion class.
pub struct DiseaseInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const DISEASE_CLASSES: &[DiseaseInfo] = &[
    DiseaseInfo {
        code: "akiec",
        name: "Actinic Keratosis",
        description: "Rough, scaly patch caused by long-term sun exposure; can progress if untreated.",
    },
    DiseaseInfo {
        code: "bcc",
        name: "Basal Cell Carcinoma",
        description: "The most common form of skin cancer; grows slowly but requires treatment.",
    },
    DiseaseInfo {
        code: "bkl",
        name: "Benign Keratosis",
        description: "Non-cancerous growth such as a seborrheic keratosis or solar lentigo.",
    },
    DiseaseInfo {
        code: "df",
        name: "Dermatofibroma",
        description: "A harmless firm nodule, most often found on the lower legs.",
    },
    DiseaseInfo {
        code: "mel",
        name: "Melanoma",
        description: "The most serious form of skin cancer; early diagnosis is critical.",
    },
    DiseaseInfo {
        code: "nv",
        name: "Melanocytic Nevus",
        description: "A common mole; usually benign.",
    },
    DiseaseInfo {
        code: "vasc",
        name: "Vascular Lesion",
        description: "Blood-vessel growth such as an angioma or pyogenic granuloma.",
    },
];

pub fn disease_info(code: &str) -> Option<&'static DiseaseInfo> {
    DISEASE_CLASSES.iter().find(|d| d.code == code)
}

/// Classes whose detection warrants an elevated-urgency notice.
pub fn is_high_urgency(code: &str) -> bool {
    matches!(code, "mel" | "bcc")
}

/// Confidence bucket used purely for display styling. The stored confidence
/// value is never altered; boundaries are inclusive on the upper tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.8 {
            Severity::High
        } else if confidence >= 0.6 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Severity::High => "severity-high",
            Severity::Medium => "severity-medium",
            Severity::Low => "severity-low",
        }
    }
}

/// One detection prepared for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionView {
    pub code: String,
    /// Human-readable name, or the raw code when the class is unknown.
    pub label: String,
    pub description: Option<&'static str>,
    pub confidence: f32,
    pub severity: Severity,
    pub urgent: bool,
    pub bbox: Option<BoundingBox>,
}

/// A whole prediction response prepared for rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultView {
    /// The backend found nothing; render a distinct empty-state message
    /// rather than an empty table.
    Empty { message: String },
    Findings {
        message: String,
        primary: Option<PrimaryDetection>,
        detections: Vec<DetectionView>,
        /// Any detection flagged urgent raises this for the whole result.
        urgent: bool,
        visualization_url: Option<String>,
        chart_url: Option<String>,
    },
}

impl ResultView {
    pub fn from_response(resp: &PredictionResponse) -> Self {
        if resp.predictions.is_empty() {
            let message = if resp.message.is_empty() {
                "No skin condition was detected in this image.".to_string()
            } else {
                resp.message.clone()
            };
            return ResultView::Empty { message };
        }

        let detections: Vec<DetectionView> = resp
            .predictions
            .iter()
            .map(|d| {
                let info = disease_info(&d.class_name);
                DetectionView {
                    code: d.class_name.clone(),
                    label: info.map_or_else(|| d.class_name.clone(), |i| i.name.to_string()),
                    description: info.map(|i| i.description),
                    confidence: d.confidence,
                    severity: Severity::from_confidence(d.confidence),
                    urgent: is_high_urgency(&d.class_name),
                    bbox: d.bbox.clone(),
                }
            })
            .collect();

        let urgent = detections.iter().any(|d| d.urgent);

        ResultView::Findings {
            message: resp.message.clone(),
            primary: resp.primary_detection.clone(),
            detections,
            urgent,
            visualization_url: resp.visualization_url.clone(),
            chart_url: resp.chart_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Detection;

    fn response_with(codes: &[(&str, f32)]) -> PredictionResponse {
        PredictionResponse {
            message: "Analysis complete".to_string(),
            primary_detection: None,
            predictions: codes
                .iter()
                .map(|(code, conf)| Detection {
                    class_name: code.to_string(),
                    class_id: None,
                    confidence: *conf,
                    bbox: None,
                })
                .collect(),
            visualization_url: None,
            chart_url: None,
        }
    }

    #[test]
    fn bucketing_is_inclusive_on_upper_tier() {
        assert_eq!(Severity::from_confidence(0.8), Severity::High);
        assert_eq!(Severity::from_confidence(0.79), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.6), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.59), Severity::Low);
        assert_eq!(Severity::from_confidence(1.0), Severity::High);
        assert_eq!(Severity::from_confidence(0.0), Severity::Low);
    }

    #[test]
    fn empty_predictions_render_empty_state() {
        let mut resp = response_with(&[]);
        match ResultView::from_response(&resp) {
            ResultView::Empty { message } => assert_eq!(message, "Analysis complete"),
            ResultView::Findings { .. } => panic!("expected empty state"),
        }

        resp.message.clear();
        match ResultView::from_response(&resp) {
            ResultView::Empty { message } => assert!(!message.is_empty()),
            ResultView::Findings { .. } => panic!("expected empty state"),
        }
    }

    #[test]
    fn known_codes_map_to_names_unknown_pass_through() {
        let resp = response_with(&[("mel", 0.9), ("zzz", 0.5)]);
        let ResultView::Findings { detections, .. } = ResultView::from_response(&resp) else {
            panic!("expected findings");
        };
        assert_eq!(detections[0].label, "Melanoma");
        assert!(detections[0].description.is_some());
        assert_eq!(detections[1].label, "zzz");
        assert!(detections[1].description.is_none());
    }

    #[test]
    fn melanoma_and_bcc_flag_urgency() {
        for code in ["mel", "bcc"] {
            let resp = response_with(&[("nv", 0.7), (code, 0.3)]);
            let ResultView::Findings { urgent, detections, .. } =
                ResultView::from_response(&resp)
            else {
                panic!("expected findings");
            };
            assert!(urgent);
            assert!(!detections[0].urgent);
            assert!(detections[1].urgent);
        }

        let resp = response_with(&[("nv", 0.95), ("bkl", 0.4)]);
        let ResultView::Findings { urgent, .. } = ResultView::from_response(&resp) else {
            panic!("expected findings");
        };
        assert!(!urgent);
    }

    #[test]
    fn severity_does_not_alter_stored_confidence() {
        let resp = response_with(&[("df", 0.123_456)]);
        let ResultView::Findings { detections, .. } = ResultView::from_response(&resp) else {
            panic!("expected findings");
        };
        assert_eq!(detections[0].confidence, 0.123_456);
        assert_eq!(detections[0].severity, Severity::Low);
    }
}
