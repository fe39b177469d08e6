use nestcore::*;

fn ints(v: &[i64]) -> Value {
    Value::from(v.to_vec())
}

fn table() -> Value {
    Value::Int(Array::new([2, 3], [1i64, 2, 3, 4, 5, 6]))
}

#[test]
fn pervasive_identity() {
    let env = Core::default();
    let x = ints(&[1, 2, 3]);
    let direct = Prim::Plus.dyadic(Value::from(10i64), x.clone(), &env).unwrap();
    let each_way = eachboth(&Prim::Plus, Value::from(10i64), x.clone(), &env).unwrap();
    assert_eq!(direct, each_way);
    let nested = Value::list(vec![ints(&[1, 2]), Value::from(3i64)]);
    let res = Prim::Times.dyadic(nested, Value::from(2i64), &env).unwrap();
    assert_eq!(res, Value::list(vec![ints(&[2, 4]), Value::from(6i64)]));
}

#[test]
fn broadcasting_identity() {
    let env = Core::default();
    let a = Value::from(5i64);
    let x = ints(&[1, 2, 3]);
    let left = eachboth(&Prim::Minus, a.clone(), x.clone(), &env).unwrap();
    let bound = Monadic(|v: Value, env: &Core| Prim::Minus.dyadic(a.clone(), v, env));
    let right = each(&bound, x, &env).unwrap();
    assert_eq!(left, right);
}

#[test]
fn sort_grade_consistency() {
    let env = Core::default();
    let x = Value::list(vec![
        Value::from('c'),
        ints(&[2, 1]),
        Value::from(3i64),
        Value::from(0.5),
        Value::string("ab"),
        Value::from(3i64),
    ]);
    let by_grade = choose(gradeup(x.clone(), &env).unwrap(), x.clone(), &env).unwrap();
    assert_eq!(by_grade, sortup(x, &env).unwrap());
    let down = Dyadic(|a: Value, b: Value, env: &Core| Prim::Gte.dyadic(a, b, env));
    let y = ints(&[4, 9, 1, 9, 0]);
    let sorted = sort(&down, y.clone(), &env).unwrap();
    assert_eq!(sorted, ints(&[9, 9, 4, 1, 0]));
    assert_eq!(choose(grade(&down, y.clone(), &env).unwrap(), y, &env).unwrap(), sorted);
}

#[test]
fn sortedness_soundness() {
    let env = Core::default();
    let sorted = sortup(ints(&[7, 3, 3, 9, 1, 5]), &env).unwrap();
    assert!(sorted.is_sorted());
    let mut plain = ints(&[1, 3, 3, 5, 7, 9]);
    plain.clear_sorted();
    assert!(!plain.is_sorted());
    for x in 0..11i64 {
        let fast = seek(Value::from(x), sorted.clone(), &env).unwrap();
        let slow = seek(Value::from(x), plain.clone(), &env).unwrap();
        assert_eq!(fast, slow, "seeking {x}");
    }
}

#[test]
fn sortedness_is_established_not_asserted() {
    let env = Core::default();
    let mut sorted = sortup(ints(&[4, 2, 8]), &env).unwrap();
    assert!(sorted.is_sorted());
    sorted.clear_sorted();
    assert!(!sorted.is_sorted());
    assert!(check_sorted(&mut sorted));
    assert!(sorted.is_sorted());
    let mut unsorted = ints(&[3, 1, 2]);
    unsorted.clear_sorted();
    assert!(!check_sorted(&mut unsorted));
    let found = seek(Value::from(1i64), unsorted, &env).unwrap();
    assert_eq!(found, Value::pair(true.into(), Value::from(1i64)));
}

#[test]
fn fold_identities() {
    let env = Core::default();
    assert_eq!(reduce(&Prim::Plus, Value::null(), &env).unwrap(), Value::fault(Fault::Identity));
    assert_eq!(reduce(&Prim::Plus, ints(&[4]), &env).unwrap(), Value::from(4i64));
    assert_eq!(reduce(&Prim::Minus, ints(&[8, 4, 2]), &env).unwrap(), Value::from(6i64));
    let res = leftaccumulate(&Prim::Plus, ints(&[1, 2, 3]), &env).unwrap();
    assert_eq!(res, ints(&[1, 3, 6]));
}

#[test]
fn overflow_contract() {
    let env = Core::default();
    let res = Prim::Plus.dyadic(Value::from(i64::MAX), Value::from(1i64), &env).unwrap();
    assert_eq!(res, Value::fault(Fault::Overflow));
    let res = Prim::Plus.dyadic(Value::from(3i64), Value::from(4i64), &env).unwrap();
    assert_eq!(res, Value::from(7i64));
    let res = Prim::Plus.dyadic(ints(&[1, i64::MAX]), ints(&[1, 1]), &env).unwrap();
    assert_eq!(res, Value::list(vec![Value::from(2i64), Value::fault(Fault::Overflow)]));
}

#[test]
fn conform_law() {
    let env = Core::default();
    let res = eachboth(&Prim::Plus, ints(&[1, 2, 3]), ints(&[1, 2]), &env).unwrap();
    assert_eq!(res, Value::fault(Fault::Conform));
}

#[test]
fn transpose_round_trip() {
    let env = Core::default();
    let t = transpose(table(), &env).unwrap();
    assert_eq!(transpose(t.clone(), &env).unwrap(), table());
    assert_eq!(fuse(ints(&[1, 0]), table(), &env).unwrap(), t);
}

#[test]
fn cull_and_except() {
    let env = Core::default();
    let x = Value::list(vec![
        Value::from(1i64),
        Value::phrase("a"),
        Value::from(1i64),
        ints(&[1]),
        Value::phrase("a"),
    ]);
    let once = cull(x, &env).unwrap();
    assert_eq!(once.tally(), 3);
    assert_eq!(cull(once.clone(), &env).unwrap(), once);
    assert_eq!(except(ints(&[1, 2, 2, 3]), ints(&[2]), &env).unwrap(), ints(&[1, 3]));
}

#[test]
fn homogeneity_collapse() {
    let env = Core::default();
    let res = each(&Prim::Opposite, ints(&[1, 2, 3]), &env).unwrap();
    assert_eq!(res.kind(), Kind::Int);
    let hetero = Value::list(vec![Value::from(1i64), Value::from(2.0)]);
    let res = each(&Prim::Floor, hetero, &env).unwrap();
    assert_eq!(res.kind(), Kind::Int);
}

#[test]
fn faults_flow_through_combinators() {
    let env = Core::default();
    let fault = Value::fault(Fault::new("oops"));
    assert_eq!(each(&Prim::Tally, fault.clone(), &env).unwrap(), fault);
    assert_eq!(reduce(&Prim::Plus, fault.clone(), &env).unwrap(), fault);
    assert_eq!(sortup(fault.clone(), &env).unwrap(), fault);
    let bottom = Value::fault(Fault::Bottom);
    assert_eq!(each(&Prim::Tally, bottom, &env).unwrap(), Value::from(1i64));
}

#[test]
fn allocation_limit_is_fatal() {
    let env = Core::new(CoreConfig {
        max_elements: 100,
        ..CoreConfig::default()
    });
    let err = tell(Value::from(1000i64), &env).unwrap_err();
    assert!(err.is_alloc());
    let err = reshape(ints(&[20, 20]), ints(&[1]), &env).unwrap_err();
    assert!(matches!(err, Fatal::Alloc { elements: 400 }));
}

#[test]
fn host_failures_abort() {
    let env = Core::default();
    let failing = Monadic(|_: Value, _: &Core| Err(Fatal::Host("host gave up".into())));
    let err = each(&failing, ints(&[1, 2]), &env).unwrap_err();
    assert_eq!(err.to_string(), "host gave up");
}
