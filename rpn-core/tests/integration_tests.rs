// Integration tests for the broadcast wrappers, lazy sequences and the
// builtin operator table, driven only through the public API

use rpn_core::{
    DispatchConfig, ElementCount, LazySequence, Operator, OperatorTable, RuntimeError, Scalar, Value,
    arithmetic_range, list_and_one_arg, list_and_two_args, list_arg, numeric, one_arg, sized_range, two_arg,
};
use rpn_core::primitives::nth::nth_impl;
use rpn_core::primitives::sublist::sublist_impl;
use std::cell::Cell;
use std::rc::Rc;

fn add(a: Scalar, b: Scalar) -> Result<Value, RuntimeError> {
    numeric::add(&a, &b).map(Value::Scalar)
}

fn naturals() -> LazySequence {
    arithmetic_range(Scalar::from(1), Scalar::Number(f64::INFINITY), Scalar::from(1)).unwrap()
}

fn expect_sequence(value: Value) -> LazySequence {
    match value {
        Value::Sequence(seq) => seq,
        other => panic!("expected a sequence, got {:?}", other),
    }
}

#[test]
fn test_two_scalars_reach_the_kernel_directly() {
    let wrapped = two_arg(add);
    for (a, b) in [(2, 3), (-7, 7), (1000, 1)] {
        assert_eq!(
            wrapped.call(Value::from(a), Value::from(b)).unwrap(),
            add(Scalar::from(a), Scalar::from(b)).unwrap()
        );
    }
}

#[test]
fn test_singleton_lists_behave_as_their_element() {
    let wrapped = two_arg(add);
    assert_eq!(
        wrapped.call(Value::from(vec![4]), Value::from(vec![5])).unwrap(),
        Value::from(9)
    );

    // Nested singletons unwrap all the way down
    let nested = Value::from(vec![Value::from(vec![4])]);
    assert_eq!(wrapped.call(nested, Value::from(5)).unwrap(), Value::from(9));
}

#[test]
fn test_scalar_broadcasts_against_list_in_either_order() {
    let wrapped = two_arg(add);
    assert_eq!(
        wrapped.call(Value::from(3), Value::from(vec![1, 2, 3])).unwrap(),
        Value::from(vec![4, 5, 6])
    );
    assert_eq!(
        wrapped.call(Value::from(vec![1, 2, 3]), Value::from(3)).unwrap(),
        Value::from(vec![4, 5, 6])
    );
}

#[test]
fn test_list_pairs_truncate_to_shorter() {
    let wrapped = two_arg(add);
    assert_eq!(
        wrapped.call(Value::from(vec![1, 2, 3]), Value::from(vec![10, 20])).unwrap(),
        Value::from(vec![11, 22])
    );
    assert_eq!(
        wrapped.call(Value::from(vec![1, 2, 3]), Value::from(vec![10, 20, 30, 40])).unwrap(),
        Value::from(vec![11, 22, 33])
    );
}

#[test]
fn test_ranges() {
    let seq = arithmetic_range(Scalar::from(1), Scalar::from(5), Scalar::from(1)).unwrap();
    assert_eq!(seq.count_hint().value(), Some(5));
    assert_eq!(seq.collect_list().unwrap(), Value::from(vec![1, 2, 3, 4, 5]));

    let seq = sized_range(Scalar::from(2), Scalar::from(3), 4);
    assert_eq!(seq.count_hint(), ElementCount::Exact(4));
    assert_eq!(seq.collect_list().unwrap(), Value::from(vec![2, 5, 8, 11]));
}

#[test]
fn test_mapping_unbounded_range_calls_kernel_once_per_pull() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let squared = one_arg(move |x| {
        counter.set(counter.get() + 1);
        numeric::multiply(&x, &x).map(Value::Scalar)
    });

    let mut seq = expect_sequence(squared.call(Value::Sequence(naturals())).unwrap());
    assert_eq!(calls.get(), 0);
    assert_eq!(seq.take_list(5).unwrap(), Value::from(vec![1, 4, 9, 16, 25]));
    assert_eq!(calls.get(), 5);
}

#[test]
fn test_pairing_two_unbounded_sequences_terminates() {
    let wrapped = two_arg(add);
    let mut sums = expect_sequence(wrapped.call(Value::Sequence(naturals()), Value::Sequence(naturals())).unwrap());
    assert_eq!(sums.take_list(4).unwrap(), Value::from(vec![2, 4, 6, 8]));
}

#[test]
fn test_unbounded_sequence_against_list_stays_lazy() {
    let wrapped = two_arg(add);
    let result = wrapped
        .call(Value::from(vec![100, 200, 300]), Value::Sequence(naturals()))
        .unwrap();
    let sums = expect_sequence(result);
    assert_eq!(sums.count_hint(), ElementCount::Estimated(3));
    assert_eq!(sums.collect_list().unwrap(), Value::from(vec![101, 202, 303]));
}

#[test]
fn test_fork_branches_agree_regardless_of_order() {
    let mut left = sized_range(Scalar::from(1), Scalar::from(2), 6);
    let right = left.fork();

    // Drain the fork first, then the parent
    let from_right = right.collect_list().unwrap();
    let from_left = left.collect_list().unwrap();
    assert_eq!(from_left, from_right);

    // Interleaved pulls
    let (mut a, mut b) = sized_range(Scalar::from(1), Scalar::from(2), 6).split();
    let mut seen_a = Vec::new();
    let mut seen_b = Vec::new();
    seen_b.push(b.next().unwrap().unwrap());
    seen_b.push(b.next().unwrap().unwrap());
    seen_a.push(a.next().unwrap().unwrap());
    seen_a.extend(a.by_ref().map(Result::unwrap));
    seen_b.extend(b.by_ref().map(Result::unwrap));
    assert_eq!(seen_a, seen_b);
}

#[test]
fn test_list_arg_coerces_scalar() {
    let length = list_arg(|items| Ok(Value::from(items.into_iter().count())));
    assert_eq!(length.call(Value::from(8)).unwrap(), length.call(Value::from(vec![8])).unwrap());
}

#[test]
fn test_lazy_error_surfaces_on_failing_pull() {
    let reciprocal = one_arg(|x| numeric::divide(&Scalar::from(1), &x).map(Value::Scalar));
    let seq = arithmetic_range(Scalar::from(-2), Scalar::from(2), Scalar::from(1)).unwrap();
    let mut results = expect_sequence(reciprocal.call(Value::Sequence(seq)).unwrap());

    assert!(matches!(results.next(), Some(Ok(_))));
    assert!(matches!(results.next(), Some(Ok(_))));
    assert_eq!(results.next(), Some(Err(RuntimeError::DivisionByZero)));
    assert_eq!(results.next(), None);
}

#[test]
fn test_eager_error_discards_partial_list() {
    let reciprocal = one_arg(|x| numeric::divide(&Scalar::from(1), &x).map(Value::Scalar));
    assert_eq!(
        reciprocal.call(Value::from(vec![1, 0, 2])),
        Err(RuntimeError::DivisionByZero)
    );
}

#[test]
fn test_depth_limit() {
    let mut value = Value::from(vec![1, 2]);
    for _ in 0..20 {
        value = Value::List(vec![value, Value::from(0)]);
    }
    let negate = one_arg(|x| numeric::negate(&x).map(Value::Scalar)).with_config(DispatchConfig::default().with_max_depth(8));
    assert_eq!(negate.call(value), Err(RuntimeError::NestingTooDeep { limit: 8 }));
}

#[test]
fn test_builtin_table_end_to_end() {
    let table = OperatorTable::with_builtins();

    // 1 10 range sqr sum => 385
    let range = table.invoke("range", vec![Value::from(1), Value::from(10)]).unwrap();
    let squares = table.invoke("sqr", vec![range]).unwrap();
    assert!(matches!(squares, Value::Sequence(_)));
    assert_eq!(table.invoke("sum", vec![squares]).unwrap(), Value::from(385));

    // [1 2 3] [10 20] + => [11 22]
    assert_eq!(
        table
            .invoke("+", vec![Value::from(vec![1, 2, 3]), Value::from(vec![10, 20])])
            .unwrap(),
        Value::from(vec![11, 22])
    );

    // 1 inf range 5 10 sublist => [6 .. 15]
    let unbounded = table
        .invoke("range", vec![Value::from(1), Value::from(f64::INFINITY)])
        .unwrap();
    let window = table
        .invoke("sublist", vec![unbounded, Value::from(5), Value::from(10)])
        .unwrap();
    assert_eq!(
        window.materialize().unwrap(),
        Value::from((6..=15).collect::<Vec<i64>>())
    );
}

#[test]
fn test_builtin_permutations_feed_aggregates() {
    let table = OperatorTable::with_builtins();
    let perms = table.invoke("permute_digits", vec![Value::from(123)]).unwrap();
    assert_eq!(table.invoke("count", vec![perms]).unwrap(), Value::from(6));

    let perms = table.invoke("permute_digits", vec![Value::from(123)]).unwrap();
    assert_eq!(table.invoke("mean", vec![perms]).unwrap(), Value::from(222));
}

#[test]
fn test_custom_operator_alongside_builtins() {
    let mut table = OperatorTable::with_builtins();
    table.register(
        "halve",
        Operator::OneArg(one_arg(|x| numeric::divide(&x, &Scalar::from(2)).map(Value::Scalar))),
        Some("Half of a value.\nUsage: n halve"),
    );
    let halves = table.invoke("halve", vec![Value::from(vec![4, 8])]).unwrap();
    assert_eq!(halves, Value::from(vec![2, 4]));
    assert!(table.contains("+"));
}

#[cfg(feature = "datetime")]
#[test]
fn test_date_range_broadcast() {
    use chrono::NaiveDate;

    let day = |d| Scalar::Date(NaiveDate::from_ymd_opt(2024, 3, d).unwrap());
    let table = OperatorTable::with_builtins();
    let week = table
        .invoke("interval_range", vec![Value::Scalar(day(1)), Value::Scalar(day(15)), Value::from(7)])
        .unwrap();
    let shifted = table.invoke("+", vec![week, Value::from(1)]).unwrap();
    assert_eq!(
        shifted.materialize().unwrap(),
        Value::List(vec![Value::Scalar(day(2)), Value::Scalar(day(9)), Value::Scalar(day(16))])
    );
}

#[test]
fn test_repeated_index_on_one_sequence() {
    let mut seq = sized_range(Scalar::from(0), Scalar::from(1), 10);
    for _ in 0..100_000 {
        assert_eq!(seq.index(0).unwrap(), Value::from(0));
    }
    assert_eq!(seq.next(), Some(Ok(Value::from(0))));
    assert_eq!(seq.collect_list().unwrap(), Value::from(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]));
}

#[test]
fn test_many_indices_into_one_sequence() {
    let nth = list_and_one_arg(nth_impl);
    let seq = LazySequence::wrap(Value::from(vec![1, 2, 3]));
    let picked = nth.call(Value::Sequence(seq), Value::from(vec![0; 20_000])).unwrap();
    let Value::List(picked) = picked else {
        panic!("expected a list, got {:?}", picked);
    };
    assert_eq!(picked.len(), 20_000);
    assert!(picked.iter().all(|v| *v == Value::from(1)));
}

#[test]
fn test_three_forks_agree() {
    let mut first = naturals();
    let mut second = first.fork();
    let third = second.fork();

    assert_eq!(first.take_list(3).unwrap(), Value::from(vec![1, 2, 3]));
    assert_eq!(third.take(3).collect::<Result<Vec<_>, _>>().unwrap(), vec![
        Value::from(1),
        Value::from(2),
        Value::from(3)
    ]);
    assert_eq!(second.take_list(4).unwrap(), Value::from(vec![1, 2, 3, 4]));
}

#[test]
fn test_split_keeps_close_hook_until_both_halves_drop() {
    let closed = Rc::new(Cell::new(false));
    let flag = closed.clone();
    let seq = arithmetic_range(Scalar::from(1), Scalar::from(5), Scalar::from(1))
        .unwrap()
        .on_close(move || flag.set(true));
    let (a, mut b) = seq.split();

    drop(a);
    assert!(!closed.get());
    assert_eq!(b.next(), Some(Ok(Value::from(1))));
    drop(b);
    assert!(closed.get());
}

#[test]
fn test_sublist_count_hint_of_owned_sequence() {
    let sublist = list_and_two_args(sublist_impl);
    let seq = sized_range(Scalar::from(0), Scalar::from(1), 10);
    let window = expect_sequence(sublist.call(Value::Sequence(seq), Value::from(2), Value::from(3)).unwrap());
    assert_eq!(window.count_hint(), ElementCount::Exact(3));
    assert_eq!(window.collect_list().unwrap(), Value::from(vec![2, 3, 4]));
}
