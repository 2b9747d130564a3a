//! Tests for exclusion rule parsing and key predicates

#[cfg(test)]
mod tests {
    use layerloom::GenerationError;
    use layerloom::model::{Attribute, ExclusionRule, Member, RuleKey, Variant, VariantKey};

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::new(
                "Background",
                vec![Variant::new("Red", 50), Variant::new("Blue", 50)],
            ),
            Attribute::new(
                "Hat",
                vec![Variant::new("Crown", 50), Variant::new("Cap", 50)],
            ),
        ]
    }

    // Tests plain and negated keys resolve to the same variant indices
    // Verified by keeping the marker in the variant name
    #[test]
    fn test_parse_keys() {
        let attributes = attributes();

        assert_eq!(
            RuleKey::parse("Hat/Cap", &attributes).unwrap(),
            RuleKey::plain(VariantKey::new(1, 1))
        );
        assert_eq!(
            RuleKey::parse("Background/!Red", &attributes).unwrap(),
            RuleKey::negated(VariantKey::new(0, 0))
        );
    }

    // Tests malformed and unknown keys are configuration errors
    // Verified by defaulting unknown names to the first variant
    #[test]
    fn test_parse_rejects_bad_keys() {
        let attributes = attributes();

        for raw in ["HatCap", "Shoes/Boot", "Hat/Helmet", "Hat/!Helmet", ""] {
            let err = RuleKey::parse(raw, &attributes).unwrap_err();
            assert!(
                matches!(err, GenerationError::Configuration { .. }),
                "'{raw}' should be rejected"
            );
        }
    }

    // Tests a rule without keys is rejected
    // Verified by accepting empty rules as no-ops
    #[test]
    fn test_empty_rule_rejected() {
        let keys: [&str; 0] = [];
        assert!(ExclusionRule::parse(&keys, &attributes()).is_err());
    }

    // Tests only plain keys trigger and only gates demand other variants
    // Verified by letting negated keys trigger the rule
    #[test]
    fn test_rule_predicates() {
        let rule = ExclusionRule::parse(&["Hat/Crown", "Background/!Red"], &attributes()).unwrap();
        let red = VariantKey::new(0, 0);
        let blue = VariantKey::new(0, 1);
        let crown = VariantKey::new(1, 0);

        assert!(rule.triggers(crown));
        assert!(!rule.triggers(red));
        assert!(!rule.triggers(blue));
        assert!(rule.requires_other_variant(blue));
        assert!(!rule.requires_other_variant(red));
        assert!(!rule.requires_other_variant(crown));
        assert_eq!(rule.plain_keys().collect::<Vec<_>>(), vec![crown]);
        assert_eq!(rule.negated_keys().collect::<Vec<_>>(), vec![red]);
    }

    // Tests a gate holds only when the attribute is filled with another variant
    // Verified by treating an unfilled attribute as different
    #[test]
    fn test_gate_holds() {
        let gate = RuleKey::negated(VariantKey::new(0, 0));

        assert!(gate.gate_holds(&Member::new(vec![VariantKey::new(0, 1)])));
        assert!(!gate.gate_holds(&Member::new(vec![VariantKey::new(0, 0)])));
        assert!(!gate.gate_holds(&Member::new(vec![VariantKey::new(1, 0)])));
        assert!(!RuleKey::plain(VariantKey::new(0, 0)).gate_holds(&Member::new(vec![
            VariantKey::new(0, 1)
        ])));
    }

    // Tests gates on a matched attribute are detected
    // Verified by comparing variants instead of attributes
    #[test]
    fn test_gates_own_trigger() {
        let attributes = attributes();
        let parse = |keys: &[&str]| ExclusionRule::parse(keys, &attributes).unwrap();

        assert!(parse(&["Hat/Crown", "Hat/!Cap"]).gates_own_trigger());
        assert!(parse(&["Hat/!Crown", "Hat/Crown"]).gates_own_trigger());
        assert!(!parse(&["Hat/Crown", "Background/!Red"]).gates_own_trigger());
        assert!(!parse(&["Hat/Crown", "Hat/Cap"]).gates_own_trigger());
    }

    // Tests labels round-trip the written form
    // Verified by dropping the negation marker from labels
    #[test]
    fn test_labels() {
        let attributes = attributes();
        let rule = ExclusionRule::parse(&["Hat/Crown", "Background/!Red"], &attributes).unwrap();

        assert_eq!(rule.label(&attributes), "[Hat/Crown, Background/!Red]");
    }
}
