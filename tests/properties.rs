use nestcore::{
    choose, cull, each, eachboth, equal, except, fast_sort, find, findall, gradeup, seek,
    sortup, up_cmp, Core, CoreConfig, Fault, Monadic, Operator, Prim, Value,
};
use proptest::prelude::*;

fn atom() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        (-50i64..50).prop_map(Value::from),
        (-50.0f64..50.0).prop_map(Value::from),
        proptest::char::range('a', 'f').prop_map(Value::from),
        "[a-c]{1,2}".prop_map(|s| Value::phrase(&s)),
    ]
}

fn nested() -> impl Strategy<Value = Value> {
    atom().prop_recursive(3, 48, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Value::list)
    })
}

fn int_list() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-20i64..20, 0..40)
}

fn core() -> Core {
    Core::default()
}

/// A core that always takes the sort-and-merge paths
fn merging_core() -> Core {
    Core::new(CoreConfig {
        except_crossover: 0,
        ..CoreConfig::default()
    })
}

proptest! {
    #[test]
    fn addition_matches_checked_arithmetic(a in any::<i64>(), b in any::<i64>()) {
        let res = Prim::Plus.dyadic(Value::from(a), Value::from(b), &core()).unwrap();
        match a.checked_add(b) {
            Some(sum) => prop_assert_eq!(res, Value::from(sum)),
            None => prop_assert_eq!(res, Value::fault(Fault::Overflow)),
        }
    }

    #[test]
    fn multiplication_matches_checked_arithmetic(a in any::<i64>(), b in any::<i64>()) {
        let res = Prim::Times.dyadic(Value::from(a), Value::from(b), &core()).unwrap();
        match a.checked_mul(b) {
            Some(prod) => prop_assert_eq!(res, Value::from(prod)),
            None => prop_assert_eq!(res, Value::fault(Fault::Overflow)),
        }
    }

    #[test]
    fn sort_grade_consistency(items in prop::collection::vec(nested(), 0..12)) {
        let env = core();
        let x = Value::list(items);
        let sorted = sortup(x.clone(), &env).unwrap();
        let by_grade = choose(gradeup(x, &env).unwrap(), sorted.clone(), &env).unwrap();
        prop_assert_eq!(by_grade.tally(), sorted.tally());
        prop_assert_eq!(sortup(sorted.clone(), &env).unwrap(), sorted);
    }

    #[test]
    fn choose_by_grade_sorts_nested(items in prop::collection::vec(nested(), 0..12)) {
        let env = core();
        let x = Value::list(items);
        let by_grade = choose(gradeup(x.clone(), &env).unwrap(), x.clone(), &env).unwrap();
        prop_assert_eq!(by_grade, sortup(x, &env).unwrap());
    }

    #[test]
    fn choose_by_grade_sorts(data in int_list()) {
        let env = core();
        let x = Value::from(data);
        let by_grade = choose(gradeup(x.clone(), &env).unwrap(), x.clone(), &env).unwrap();
        prop_assert_eq!(by_grade, sortup(x, &env).unwrap());
    }

    #[test]
    fn quicksort_agrees_with_merge_sort(data in prop::collection::vec(-1000i64..1000, 0..200)) {
        let env = core();
        let x = Value::from(data.clone());
        let mut expected = data;
        expected.sort();
        prop_assert_eq!(fast_sort(x.clone(), &env).unwrap(), Value::from(expected));
        prop_assert_eq!(fast_sort(x.clone(), &env).unwrap(), sortup(x, &env).unwrap());
    }

    #[test]
    fn order_agrees_with_equality(a in nested(), b in nested()) {
        let same = equal(&a, &b);
        prop_assert_eq!(up_cmp(&a, &b) == std::cmp::Ordering::Equal, same);
        prop_assert_eq!(up_cmp(&a, &b), up_cmp(&b, &a).reverse());
    }

    #[test]
    fn binary_search_agrees_with_linear(data in int_list(), target in -25i64..25) {
        let env = core();
        let sorted = sortup(Value::from(data.clone()), &env).unwrap();
        prop_assert!(sorted.is_sorted());
        let mut plain_data = data;
        plain_data.sort();
        let plain = Value::from(plain_data);
        prop_assert_eq!(
            seek(Value::from(target), sorted.clone(), &env).unwrap(),
            seek(Value::from(target), plain.clone(), &env).unwrap()
        );
        prop_assert_eq!(
            findall(Value::from(target), sorted, &env).unwrap(),
            findall(Value::from(target), plain, &env).unwrap()
        );
    }

    #[test]
    fn flagged_search_agrees_with_unflagged(items in prop::collection::vec(nested(), 0..12)) {
        let env = core();
        let sorted = sortup(Value::list(items), &env).unwrap();
        prop_assert!(sorted.is_sorted());
        let mut plain = sorted.clone();
        plain.clear_sorted();
        for item in sorted.items() {
            prop_assert_eq!(
                seek(item.clone(), sorted.clone(), &env).unwrap(),
                seek(item.clone(), plain.clone(), &env).unwrap()
            );
            prop_assert_eq!(
                find(item.clone(), sorted.clone(), &env).unwrap(),
                find(item.clone(), plain.clone(), &env).unwrap()
            );
            prop_assert_eq!(
                findall(item.clone(), sorted.clone(), &env).unwrap(),
                findall(item, plain.clone(), &env).unwrap()
            );
        }
    }

    #[test]
    fn quicksort_agrees_on_reals(data in prop::collection::vec(-100.0f64..100.0, 0..120)) {
        let env = core();
        let x = Value::from(data);
        prop_assert_eq!(fast_sort(x.clone(), &env).unwrap(), sortup(x, &env).unwrap());
    }

    #[test]
    fn quicksort_agrees_on_chars(text in "[a-z ]{0,80}") {
        let env = core();
        let x = Value::string(&text);
        let sorted = fast_sort(x.clone(), &env).unwrap();
        prop_assert!(sorted.is_sorted());
        prop_assert_eq!(sorted, sortup(x, &env).unwrap());
    }

    #[test]
    fn cull_is_idempotent(data in int_list()) {
        let env = core();
        let once = cull(Value::from(data), &env).unwrap();
        prop_assert_eq!(cull(once.clone(), &env).unwrap(), once);
    }

    #[test]
    fn cull_paths_agree(items in prop::collection::vec(nested(), 0..15)) {
        let x = Value::list(items);
        prop_assert_eq!(cull(x.clone(), &core()).unwrap(), cull(x, &merging_core()).unwrap());
    }

    #[test]
    fn except_paths_agree(a in int_list(), b in int_list()) {
        let (x, y) = (Value::from(a), Value::from(b));
        let naive = except(x.clone(), y.clone(), &core()).unwrap();
        let merged = except(x, y, &merging_core()).unwrap();
        prop_assert_eq!(naive, merged);
    }

    #[test]
    fn broadcasting_identity(a in -100i64..100, data in int_list()) {
        let env = core();
        let x = Value::from(data);
        let both = eachboth(&Prim::Times, Value::from(a), x.clone(), &env).unwrap();
        let bound = Monadic(|v: Value, env: &Core| Prim::Times.dyadic(Value::from(a), v, env));
        prop_assert_eq!(both, each(&bound, x, &env).unwrap());
    }
}
