use serde::{Deserialize, Serialize};

/// Prompt text sent to the generative model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text cross-sell suggestion returned by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub text: String,
}

impl Recommendation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// First percentage mentioned in the text, e.g. `75` for "about 75%"
    ///
    /// Models phrase the estimate freely, so this is best effort and only
    /// used for logging.
    pub fn success_probability(&self) -> Option<u8> {
        let bytes = self.text.as_bytes();

        for (index, _) in self.text.match_indices('%') {
            let start = bytes[..index]
                .iter()
                .rposition(|b| !b.is_ascii_digit())
                .map(|pos| pos + 1)
                .unwrap_or(0);

            if start == index {
                continue;
            }

            if let Ok(value) = self.text[start..index].parse::<u8>() {
                if value <= 100 {
                    return Some(value);
                }
            }
        }

        None
    }
}

/// Response body for `GET /customer/{customer_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferResponse {
    pub personalized_offer: String,
}

impl From<Recommendation> for OfferResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            personalized_offer: recommendation.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_probability_found() {
        let rec = Recommendation::new(
            "**Recommended Product:** Term life insurance\n**Estimated success probability:** 72%",
        );
        assert_eq!(rec.success_probability(), Some(72));
    }

    #[test]
    fn test_success_probability_skips_bare_percent() {
        let rec = Recommendation::new("Rates drop by a few % points; likelihood 65%.");
        assert_eq!(rec.success_probability(), Some(65));
    }

    #[test]
    fn test_success_probability_ignores_out_of_range() {
        let rec = Recommendation::new("Balance grew 250% last year.");
        assert_eq!(rec.success_probability(), None);
    }

    #[test]
    fn test_success_probability_absent() {
        let rec = Recommendation::new("A premium credit card would suit this customer.");
        assert_eq!(rec.success_probability(), None);
    }

    #[test]
    fn test_offer_response_serializes_field_name() {
        let body = serde_json::to_value(OfferResponse::from(Recommendation::new("Offer"))).unwrap();
        assert_eq!(body, serde_json::json!({ "personalized_offer": "Offer" }));
    }
}
