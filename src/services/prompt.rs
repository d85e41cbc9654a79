use crate::models::Prompt;

const CUSTOMER_DATA_PLACEHOLDER: &str = "{customer_data}";

/// Instruction frame wrapped around every customer profile
pub const OFFER_TEMPLATE: &str = "\
Given the following customer data:

{customer_data}

Suggest a personalized cross-sell offer. Include:
- Recommended Product/Service
- Why this is a good fit
- Estimated success probability

Only suggest relevant, ethical, and valuable offers.
";

/// Builds the recommendation prompt for a rendered profile
///
/// Pure: the same profile text always yields the same prompt. Empty text is
/// accepted; callers decide whether an empty profile is worth sending.
pub fn compose_prompt(profile_text: &str) -> Prompt {
    Prompt::new(OFFER_TEMPLATE.replacen(CUSTOMER_DATA_PLACEHOLDER, profile_text, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_embedded_in_frame() {
        let prompt = compose_prompt("customer_id: GC000001\ncredit_score: 782");

        assert!(prompt
            .as_str()
            .starts_with("Given the following customer data:\n\ncustomer_id: GC000001\n"));
        assert!(prompt.as_str().contains("credit_score: 782\n\nSuggest"));
        assert!(!prompt.as_str().contains(CUSTOMER_DATA_PLACEHOLDER));
    }

    #[test]
    fn test_requests_all_sections() {
        let prompt = compose_prompt("customer_id: GC000001");

        assert!(prompt.as_str().contains("- Recommended Product/Service"));
        assert!(prompt.as_str().contains("- Why this is a good fit"));
        assert!(prompt.as_str().contains("- Estimated success probability"));
        assert!(prompt
            .as_str()
            .contains("Only suggest relevant, ethical, and valuable offers."));
    }

    #[test]
    fn test_compose_is_byte_identical() {
        let text = "customer_id: GC000001\nage: 34";
        assert_eq!(compose_prompt(text), compose_prompt(text));
    }

    #[test]
    fn test_placeholder_in_profile_not_expanded_twice() {
        let prompt = compose_prompt("note: {customer_data}");
        assert_eq!(prompt.as_str().matches(CUSTOMER_DATA_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_empty_profile_still_composes() {
        let prompt = compose_prompt("");
        assert!(prompt
            .as_str()
            .starts_with("Given the following customer data:\n\n\n\nSuggest"));
    }
}
