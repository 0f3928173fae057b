use crate::{
    predicate::{
        CompilePolicy, Condition, compile_all, compile_any, compile_grouped, compile_with,
    },
    test_fixtures::Customer,
    value::Value,
};
use proptest::prelude::*;

fn arb_customer() -> impl Strategy<Value = Customer> {
    (
        prop_oneof![Just("Al"), Just("Bo"), Just("Cy"), Just("Di")],
        -100i64..100,
        any::<bool>(),
    )
        .prop_map(|(name, age, vip)| {
            let customer = Customer::new(name, age);
            if vip { customer.vip() } else { customer }
        })
}

// Conditions over non-nullable fields only, so evaluation is total.
fn arb_condition() -> impl Strategy<Value = Condition> {
    prop_oneof![
        (-100i64..100).prop_map(|n| Condition::eq("age", n)),
        (-100i64..100).prop_map(|n| Condition::ne("age", n)),
        (-100i64..100).prop_map(|n| Condition::gt("age", n)),
        (-100i64..100).prop_map(|n| Condition::lte("age", n)),
        prop_oneof![Just("Al"), Just("Bo"), Just("Zz")].prop_map(|s| Condition::eq("name", s)),
        any::<bool>().prop_map(|b| Condition::eq("vip", b)),
        prop_oneof![Just("A"), Just("B")].prop_map(|s| Condition::starts_with("name", s)),
    ]
}

proptest! {
    #[test]
    fn empty_condition_lists_always_match(customer in arb_customer()) {
        for policy in [CompilePolicy::GroupedAnd, CompilePolicy::FlatAnd, CompilePolicy::FlatOr] {
            let predicate = compile_with::<Customer>(&[], policy).unwrap();
            prop_assert!(predicate.matches(&customer).unwrap());
        }
    }

    #[test]
    fn flat_and_is_the_conjunction_of_its_atoms(
        conditions in prop::collection::vec(arb_condition(), 0..5),
        customer in arb_customer(),
    ) {
        let combined = compile_all::<Customer>(&conditions).unwrap();

        let each = conditions.iter().all(|condition| {
            compile_all::<Customer>(std::slice::from_ref(condition))
                .unwrap()
                .matches(&customer)
                .unwrap()
        });

        prop_assert_eq!(combined.matches(&customer).unwrap(), each);
    }

    #[test]
    fn flat_or_is_the_disjunction_of_its_atoms(
        conditions in prop::collection::vec(arb_condition(), 1..5),
        customer in arb_customer(),
    ) {
        let combined = compile_any::<Customer>(&conditions).unwrap();

        let any = conditions.iter().any(|condition| {
            compile_all::<Customer>(std::slice::from_ref(condition))
                .unwrap()
                .matches(&customer)
                .unwrap()
        });

        prop_assert_eq!(combined.matches(&customer).unwrap(), any);
    }

    #[test]
    fn membership_is_the_disjunction_of_equalities(
        ages in prop::collection::vec(-100i64..100, 0..6),
        customer in arb_customer(),
    ) {
        let values = ages.iter().copied().map(Value::Int).collect();
        let membership = compile_all::<Customer>(&[Condition::in_list("age", values)]).unwrap();

        let any_eq = ages.contains(&customer.age);

        prop_assert_eq!(membership.matches(&customer).unwrap(), any_eq);
    }

    #[test]
    fn grouped_and_ors_within_a_tag(
        a in arb_condition(),
        b in arb_condition(),
        rest in arb_condition(),
        customer in arb_customer(),
    ) {
        let conditions = [
            rest.clone(),
            a.clone().or_group("g"),
            b.clone().or_group("g"),
        ];
        let grouped = compile_grouped::<Customer>(&conditions).unwrap();

        let atom = |condition: &Condition| {
            compile_all::<Customer>(std::slice::from_ref(condition))
                .unwrap()
                .matches(&customer)
                .unwrap()
        };
        let expected = atom(&rest) && (atom(&a) || atom(&b));

        prop_assert_eq!(grouped.matches(&customer).unwrap(), expected);
    }

    #[test]
    fn recompilation_is_behaviorally_equivalent(
        conditions in prop::collection::vec(arb_condition(), 0..5),
        customer in arb_customer(),
    ) {
        let first = compile_grouped::<Customer>(&conditions).unwrap();
        let second = compile_grouped::<Customer>(&conditions).unwrap();

        prop_assert_eq!(
            first.matches(&customer).unwrap(),
            second.matches(&customer).unwrap()
        );
    }
}
