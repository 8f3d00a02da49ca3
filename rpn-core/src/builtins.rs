use crate::dispatch::{list_and_one_arg, list_and_two_args, list_arg, one_arg, two_arg};
use crate::operators::{Operator, OperatorTable};
use crate::primitives;

pub fn register_builtins(table: &mut OperatorTable) {
    // Helper to add a builtin with optional documentation
    let add_builtin = |table: &mut OperatorTable, name: &str, operator: Operator, doc: Option<&str>| {
        table.register(name, operator, doc);
    };

    // Arithmetic
    add_builtin(table, "+", Operator::TwoArg(two_arg(primitives::plus::add_impl)),
        Some("Add two values, element by element for lists and sequences.\nUsage: a b +\nExample: [1 2 3] 10 + => [11 12 13]"));
    add_builtin(table, "-", Operator::TwoArg(two_arg(primitives::minus::sub_impl)),
        Some("Subtract the top value from the one below it.\nUsage: a b -\nExample: 10 [1 2] - => [9 8]"));
    add_builtin(table, "*", Operator::TwoArg(two_arg(primitives::multiply::mul_impl)),
        Some("Multiply two values.\nUsage: a b *\nExample: [1 2 3] [4 5 6] * => [4 10 18]"));
    add_builtin(table, "/", Operator::TwoArg(two_arg(primitives::divide::div_impl)),
        Some("Divide. Integers divide exactly into rationals.\nUsage: a b /\nExample: 7 2 / => 7/2"));
    add_builtin(table, "**", Operator::TwoArg(two_arg(primitives::pow::pow_impl)),
        Some("Raise a base to a power.\nUsage: base exponent **\nExample: 2 10 ** => 1024"));
    add_builtin(table, "neg", Operator::OneArg(one_arg(primitives::negate::neg_impl)),
        Some("Negate a value.\nUsage: a neg\nExample: [1 -2] neg => [-1 2]"));
    add_builtin(table, "sqr", Operator::OneArg(one_arg(primitives::square::sqr_impl)),
        Some("Square a value.\nUsage: a sqr\nExample: [2 3] sqr => [4 9]"));

    // Aggregates
    add_builtin(table, "sum", Operator::ListArg(list_arg(primitives::sum::sum_impl)),
        Some("Add up a list or sequence; a list of lists sums each row.\nUsage: list sum\nExample: [1 2 3] sum => 6"));
    add_builtin(table, "mean", Operator::ListArg(list_arg(primitives::mean::mean_impl)),
        Some("Arithmetic mean of a list or sequence.\nUsage: list mean\nExample: [1 2 6] mean => 3"));
    add_builtin(table, "count", Operator::ListArg(list_arg(primitives::count::count_impl)),
        Some("Number of elements in a list or sequence.\nUsage: list count\nExample: [4 5 6] count => 3"));

    // Element access
    add_builtin(table, "nth", Operator::ListAndOneArg(list_and_one_arg(primitives::nth::nth_impl)),
        Some("Element at a position, counting from 0.\nUsage: list i nth\nExample: [4 5 6] [0 2] nth => [4 6]"));
    add_builtin(table, "sublist", Operator::ListAndTwoArgs(list_and_two_args(primitives::sublist::sublist_impl)),
        Some("Take count elements starting at a position.\nUsage: list start count sublist\nExample: [1 2 3 4 5] 1 3 sublist => [2 3 4]"));

    // Generators
    add_builtin(table, "range", Operator::TwoArg(two_arg(primitives::range::range_impl)),
        Some("Count by one from start to end.\nUsage: start end range\nExample: 1 5 range => [1 2 3 4 5]"));
    add_builtin(table, "interval_range", Operator::generator(primitives::range::interval_range_impl),
        Some("Count from start to end by step.\nUsage: start end step interval_range\nExample: 1 10 3 interval_range => [1 4 7 10]"));
    add_builtin(table, "sized_range", Operator::generator(primitives::range::sized_range_impl),
        Some("A fixed number of values, each step apart.\nUsage: start step count sized_range\nExample: 2 3 4 sized_range => [2 5 8 11]"));
    add_builtin(table, "geometric_range", Operator::generator(primitives::range::geometric_range_impl),
        Some("A fixed number of values, each ratio times the last.\nUsage: start ratio count geometric_range\nExample: 1 2 5 geometric_range => [1 2 4 8 16]"));
    add_builtin(table, "exponential_range", Operator::generator(primitives::range::exponential_range_impl),
        Some("A fixed number of values, each the last raised to a power.\nUsage: start exponent count exponential_range\nExample: 2 2 4 exponential_range => [2 4 16 256]"));
    add_builtin(table, "permute_digits", Operator::OneArg(one_arg(primitives::permute::permute_digits_impl)),
        Some("Every rearrangement of an integer's digits.\nUsage: n permute_digits\nExample: 123 permute_digits => [123 132 213 231 312 321]"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{Vec, vec};
    use crate::value::Value;

    #[test]
    fn test_every_builtin_is_documented() {
        let table = OperatorTable::with_builtins();
        assert_eq!(table.len(), 18);
        for name in table.names() {
            assert!(table.doc(&name).is_some(), "{} has no documentation", name);
        }
    }

    #[test]
    fn test_builtin_arities() {
        let table = OperatorTable::with_builtins();
        let arity = |name: &str| table.get(name).map(|entry| entry.operator.arity());
        assert_eq!(arity("sqr"), Some(1));
        assert_eq!(arity("sum"), Some(1));
        assert_eq!(arity("+"), Some(2));
        assert_eq!(arity("nth"), Some(2));
        assert_eq!(arity("sublist"), Some(3));
        assert_eq!(arity("sized_range"), Some(3));
    }

    #[test]
    fn test_doc_examples() {
        let table = OperatorTable::with_builtins();
        let run = |name: &str, args: Vec<Value>| table.invoke(name, args).unwrap().materialize().unwrap();

        assert_eq!(run("*", vec![Value::from(vec![1, 2, 3]), Value::from(vec![4, 5, 6])]), Value::from(vec![4, 10, 18]));
        assert_eq!(run("mean", vec![Value::from(vec![1, 2, 6])]), Value::from(3));
        assert_eq!(run("range", vec![Value::from(1), Value::from(5)]), Value::from(vec![1, 2, 3, 4, 5]));
        assert_eq!(
            run("interval_range", vec![Value::from(1), Value::from(10), Value::from(3)]),
            Value::from(vec![1, 4, 7, 10])
        );
        assert_eq!(
            run("sublist", vec![Value::from(vec![1, 2, 3, 4, 5]), Value::from(1), Value::from(3)]),
            Value::from(vec![2, 3, 4])
        );
    }
}
