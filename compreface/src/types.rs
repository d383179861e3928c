//! Response types for the verification endpoint.

use serde::Deserialize;

/// Verification response.
///
/// Response shape:
///
/// ```json
/// {
///   "result": [
///     {
///       "source_image_face": { ... },
///       "face_matches": [
///         { "similarity": 0.99, ... }
///       ]
///     }
///   ]
/// }
/// ```
///
/// Unknown fields are ignored; a missing `result` list parses as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub result: Vec<VerifyResult>,
}

/// One entry per face found in the source image.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResult {
    #[serde(default)]
    pub face_matches: Vec<FaceMatch>,
}

/// A candidate face in the target image with its similarity to the source.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceMatch {
    /// Normalized similarity in `[0, 1]`; higher means more likely the
    /// same face.
    pub similarity: f32,
}

impl VerifyResponse {
    /// Highest similarity across all result entries, or `None` if the
    /// service found no face pair to compare.
    pub fn max_similarity(&self) -> Option<f32> {
        self.result
            .iter()
            .flat_map(|r| r.face_matches.iter())
            .map(|m| m.similarity)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f32| a.max(s))))
    }

    /// True if any similarity score is at or above `threshold`.
    pub fn has_match(&self, threshold: f32) -> bool {
        self.result
            .iter()
            .any(|r| r.face_matches.iter().any(|m| m.similarity >= threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_response() {
        let json = r#"{
            "result": [
                {
                    "source_image_face": {"x_min": 0},
                    "face_matches": [
                        {"similarity": 0.42, "box": {}},
                        {"similarity": 0.91}
                    ]
                },
                {"face_matches": [{"similarity": 0.10}]}
            ]
        }"#;
        let resp: VerifyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result.len(), 2);
        assert_eq!(resp.max_similarity(), Some(0.91));
        assert!(resp.has_match(0.80));
        assert!(!resp.has_match(0.95));
    }

    #[test]
    fn parse_empty_result() {
        let resp: VerifyResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.result.is_empty());
        assert_eq!(resp.max_similarity(), None);
        assert!(!resp.has_match(0.0));
    }
}
