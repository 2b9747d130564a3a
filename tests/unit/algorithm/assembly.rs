//! Tests for greedy first-fit member assembly

#[cfg(test)]
mod tests {
    use layerloom::GenerationError;
    use layerloom::algorithm::allocation::{AllocationPlan, AllocationPool};
    use layerloom::algorithm::assembly::{assemble_member, completes_duplicate};
    use layerloom::algorithm::validation::validate_member;
    use layerloom::model::{
        Attribute, CollectionConfig, ExclusionRule, Member, Variant, VariantKey,
    };

    const RED: VariantKey = VariantKey::new(0, 0);
    const BLUE: VariantKey = VariantKey::new(0, 1);
    const CROWN: VariantKey = VariantKey::new(1, 0);
    const CAP: VariantKey = VariantKey::new(1, 1);

    fn background() -> Attribute {
        Attribute::new(
            "Background",
            vec![Variant::new("Red", 50), Variant::new("Blue", 50)],
        )
    }

    fn hat() -> Attribute {
        Attribute::new(
            "Hat",
            vec![Variant::new("Crown", 50), Variant::new("Cap", 50)],
        )
    }

    fn config(min_unique: usize, rules: &[&[&str]]) -> CollectionConfig {
        let attributes = vec![background(), hat()];
        let rules = rules
            .iter()
            .map(|keys| ExclusionRule::parse(*keys, &attributes).unwrap())
            .collect();
        CollectionConfig::new(2, min_unique, attributes, rules).unwrap()
    }

    fn plan(background: Vec<VariantKey>, hat: Vec<VariantKey>) -> AllocationPlan {
        AllocationPlan::new(vec![
            AllocationPool::new(0, background),
            AllocationPool::new(1, hat),
        ])
    }

    // Tests the first token of every pool is taken when nothing constrains it
    // Verified by scanning pools from the back
    #[test]
    fn test_first_fit_consumes_front_tokens() {
        let config = config(0, &[]);
        let mut plan = plan(vec![RED, BLUE], vec![CROWN, CAP]);

        let member = assemble_member(&config, &mut plan, &[]).unwrap();

        assert_eq!(member.keys(), &[RED, CROWN]);
        assert_eq!(plan.remaining(), 2);
        assert_eq!(plan.pool(0).unwrap().tokens(), &[BLUE]);
        assert_eq!(plan.pool(1).unwrap().tokens(), &[CAP]);
    }

    // Tests a live rule makes the scan skip to the next admissible token
    // Verified by ignoring the tracker verdict
    #[test]
    fn test_exclusion_skips_candidate() {
        let config = config(0, &[&["Background/Red", "Hat/Crown"]]);
        let mut plan = plan(vec![RED, BLUE], vec![CROWN, CAP]);

        let member = assemble_member(&config, &mut plan, &[]).unwrap();

        assert_eq!(member.keys(), &[RED, CAP]);
        assert_eq!(plan.pool(1).unwrap().tokens(), &[CROWN]);
    }

    // Tests a dead end reports the attribute and the keys chosen before it
    // Verified by falling back to an inadmissible token
    #[test]
    fn test_selection_exhausted() {
        let config = config(0, &[&["Background/Red", "Hat/Crown"]]);
        let mut plan = plan(vec![RED], vec![CROWN]);

        let err = assemble_member(&config, &mut plan, &[]).unwrap_err();
        assert!(err.is_recoverable());

        match err {
            GenerationError::SelectionExhausted {
                member_index,
                attribute,
                chosen,
            } => {
                assert_eq!(member_index, 0);
                assert_eq!(attribute, "Hat");
                assert_eq!(chosen, vec!["Background/Red".to_string()]);
            }
            other => unreachable!("Expected SelectionExhausted, got {other}"),
        }
    }

    // Tests the duplicate guard steers away from a complete repeat
    // Verified by disabling the guard for the final slot
    #[test]
    fn test_duplicate_guard_avoids_repeat() {
        let config = config(1, &[]);
        let accepted = vec![Member::new(vec![RED, CROWN])];
        let mut plan = plan(vec![RED, BLUE], vec![CROWN, CAP]);

        let member = assemble_member(&config, &mut plan, &accepted).unwrap();

        assert_eq!(member.keys(), &[RED, CAP]);
    }

    // Tests no guard applies when no attribute has to be unique
    // Verified by applying the guard from the first slot
    #[test]
    fn test_duplicate_guard_disabled() {
        let config = config(0, &[]);
        let accepted = vec![Member::new(vec![RED, CROWN])];
        let mut plan = plan(vec![RED, BLUE], vec![CROWN, CAP]);

        let member = assemble_member(&config, &mut plan, &accepted).unwrap();

        assert_eq!(member.keys(), &[RED, CROWN]);
        assert!(
            validate_member(
                &member,
                config.exclusion_rules(),
                config.attributes(),
                &accepted
            )
            .is_err()
        );
    }

    // Tests the duplicate predicate needs both the prefix and the candidate
    // Verified by matching on the candidate alone
    #[test]
    fn test_completes_duplicate() {
        let accepted = vec![Member::new(vec![RED, CROWN])];

        assert!(completes_duplicate(&accepted, &[RED], CROWN));
        assert!(!completes_duplicate(&accepted, &[BLUE], CROWN));
        assert!(!completes_duplicate(&accepted, &[RED], CAP));
        assert!(!completes_duplicate(&[], &[RED], CROWN));
    }

    // Tests a negated gate forces the gated attribute when it comes later
    // Verified by letting gates activate rules
    #[test]
    fn test_negated_gate_steers_later_attribute() {
        let attributes = vec![hat(), background()];
        let rule = ExclusionRule::parse(&["Hat/Crown", "Background/!Red"], &attributes).unwrap();
        let config = CollectionConfig::new(2, 0, attributes, vec![rule]).unwrap();

        let crown = VariantKey::new(0, 0);
        let red = VariantKey::new(1, 0);
        let blue = VariantKey::new(1, 1);
        let mut plan = AllocationPlan::new(vec![
            AllocationPool::new(0, vec![crown]),
            AllocationPool::new(1, vec![blue, red]),
        ]);

        let member = assemble_member(&config, &mut plan, &[]).unwrap();

        assert_eq!(member.keys(), &[crown, red]);
    }

    // Tests a gated attribute filled first slips past assembly but fails validation
    // Verified by treating the negated key as a trigger
    #[test]
    fn test_negated_gate_is_order_dependent() {
        let config = config(0, &[&["Hat/Crown", "Background/!Red"]]);
        let mut plan = plan(vec![BLUE], vec![CROWN]);

        let member = assemble_member(&config, &mut plan, &[]).unwrap();

        assert_eq!(member.keys(), &[BLUE, CROWN]);
        assert!(
            validate_member(
                &member,
                config.exclusion_rules(),
                config.attributes(),
                &[]
            )
            .is_err()
        );
    }
}
