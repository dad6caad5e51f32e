use cmpv::*;
use pretty_assertions::assert_eq;

fn int(i: i64) -> Val {
    Val::Int(i)
}

fn float(f: f64) -> Val {
    Val::Float(f)
}

fn string(s: &str) -> Val {
    Val::Str(s.to_string())
}

fn sym(s: &str) -> Val {
    Val::Symbol(s.to_string())
}

fn ts(s: &str) -> Val {
    Val::Timestamp(s.parse().unwrap())
}

fn encode(values: &[Val], symbols: &mut SymbolTable) -> ValueBuffer {
    let mut buffer = ValueBuffer::new();
    for value in values {
        buffer.push(value, symbols);
    }
    buffer
}

fn batch<'a>(left: &'a ValueBuffer, right: &'a ValueBuffer) -> LaneBatch<'a> {
    let mut batch = LaneBatch::new(left.bytes(), right.bytes());
    for (&l, &r) in left.values().iter().zip(right.values()) {
        batch.push(l, r).unwrap();
    }
    batch
}

fn test_cmpv(policy: ComparePolicy, pairs: &[(Val, Val)], expected: &[Option<i32>]) {
    let _ = env_logger::try_init();
    let mut symbols = SymbolTable::new();
    let left = encode(&pairs.iter().map(|p| p.0.clone()).collect::<Vec<_>>(), &mut symbols);
    let right = encode(&pairs.iter().map(|p| p.1.clone()).collect::<Vec<_>>(), &mut symbols);
    let output = cmpv(&batch(&left, &right), policy, &symbols).unwrap();
    let actual: Vec<Option<i32>> = (0..pairs.len()).map(|lane| output.result(lane)).collect();
    assert_eq!(actual, expected);
    for lane in pairs.len()..LANES {
        assert_eq!(output.results[lane], 0);
    }
}

#[test]
fn test_null_and_bools() {
    test_cmpv(
        ComparePolicy::MatchingType,
        &[
            (Val::Null, Val::Null),
            (Val::Bool(false), Val::Bool(true)),
            (Val::Bool(true), Val::Bool(false)),
            (Val::Bool(true), Val::Bool(true)),
        ],
        &[Some(0), Some(-1), Some(1), Some(0)],
    );
}

#[test]
fn test_numbers() {
    test_cmpv(
        ComparePolicy::MatchingType,
        &[
            (int(5), float(5.0)),
            (int(1 << 60), float((1i64 << 60) as f64)),
            (int(-3), int(2)),
            (float(1.5), int(1)),
            (float(-0.0), float(0.0)),
            (int(i64::MIN), int(i64::MAX)),
            (int(i64::MAX), int(i64::MAX)),
            (int(i64::MIN), int(i64::MIN)),
            (int(0), int(0)),
            (float(-2.5), int(-3)),
            (int(-1), float(-0.5)),
        ],
        &[Some(0), Some(0), Some(-1), Some(1), Some(0), Some(-1), Some(0), Some(0), Some(0), Some(1), Some(-1)],
    );
}

#[test]
fn test_strings() {
    let long = "x".repeat(100);
    let longer = "x".repeat(101);
    test_cmpv(
        ComparePolicy::MatchingType,
        &[
            (string("abc"), string("abd")),
            (string("ab"), string("abc")),
            (string(""), string("")),
            (string("b"), string("abc")),
            (string(&long), string(&longer)),
            (string(&longer), string(&long)),
            (string(&long), string(&long)),
            (string("é"), string("z")),
        ],
        &[Some(-1), Some(-1), Some(0), Some(1), Some(-1), Some(1), Some(0), Some(1)],
    );
}

#[test]
fn test_symbols_compare_as_strings() {
    test_cmpv(
        ComparePolicy::MatchingType,
        &[
            (sym("abc"), string("abc")),
            (string("abc"), sym("abc")),
            (sym("abc"), sym("abd")),
            (sym("zz"), string("a")),
            (sym("a"), sym("a")),
        ],
        &[Some(0), Some(0), Some(-1), Some(1), Some(0)],
    );
}

#[test]
fn test_timestamps() {
    test_cmpv(
        ComparePolicy::MatchingType,
        &[
            (ts("2024-01-31T12:00:00Z"), ts("2024-02-01T00:00:00Z")),
            (ts("2023-12-31T23:59:59Z"), ts("2023-12-31T23:59:58Z")),
            (ts("1999-01-01T00:00:00Z"), ts("1999-01-01T00:00:00Z")),
            (ts("2000-01-01T00:00:00Z"), string("2000")),
        ],
        &[Some(-1), Some(1), Some(0), None],
    );
}

#[test]
fn test_matching_type_masks_mismatches() {
    test_cmpv(
        ComparePolicy::MatchingType,
        &[
            (int(1), string("1")),
            (Val::Null, int(0)),
            (Val::Bool(true), int(1)),
            (int(7), int(8)),
        ],
        &[None, None, None, Some(-1)],
    );
}

#[test]
fn test_sort_policies_order_types() {
    let pairs = [
        (Val::Null, int(0)),
        (int(0), Val::Null),
        (Val::Bool(true), int(-100)),
        (string("a"), int(100)),
        (ts("2000-01-01T00:00:00Z"), string("")),
        (int(3), ts("2000-01-01T00:00:00Z")),
        (Val::Null, Val::Null),
    ];
    test_cmpv(
        ComparePolicy::SortNullsFirst,
        &pairs,
        &[Some(-1), Some(1), Some(-1), Some(1), Some(-1), Some(-1), Some(0)],
    );
    test_cmpv(
        ComparePolicy::SortNullsLast,
        &pairs,
        &[Some(1), Some(-1), Some(-1), Some(1), Some(-1), Some(-1), Some(0)],
    );
}

#[test]
fn test_containers_and_decimals_never_compare() {
    let mut symbols = SymbolTable::new();
    let mut left = ValueBuffer::new();
    let mut right = ValueBuffer::new();
    left.push(&Val::List(vec![int(1)]), &mut symbols);
    right.push(&Val::List(vec![int(1)]), &mut symbols);
    left.push_raw(IonType::Decimal, &[0x80, 0x01]);
    right.push_raw(IonType::Decimal, &[0x80, 0x01]);
    left.push_raw(IonType::Struct, &[]);
    right.push(&int(1), &mut symbols);
    left.push_raw(IonType::Blob, b"abc");
    right.push_raw(IonType::Blob, b"abc");
    left.push(&int(1), &mut symbols);
    right.push(&int(1), &mut symbols);
    for policy in &[ComparePolicy::MatchingType, ComparePolicy::SortNullsFirst, ComparePolicy::SortNullsLast] {
        let output = cmpv(&batch(&left, &right), policy, &symbols).unwrap();
        assert_eq!(output.mask, LaneMask::new(0b10000), "{}", policy);
        assert_eq!(output.results, [0; LANES]);
    }
}

#[test]
fn test_typed_nulls_are_null() {
    let buf = [0x2F, 0x0F, 0x8F];
    let mut batch = LaneBatch::new(&buf, &buf);
    batch.push(ValueRef::new(0, 1, 0, 0x2F), ValueRef::new(1, 2, 0, 0x0F)).unwrap();
    batch.push(ValueRef::new(2, 3, 0, 0x8F), ValueRef::new(0, 1, 0, 0x2F)).unwrap();
    let output = cmpv(&batch, ComparePolicy::MatchingType, &SymbolTable::new()).unwrap();
    assert_eq!(output.result(0), Some(0));
    assert_eq!(output.result(1), Some(0));
}

#[test]
fn test_unknown_symbols() {
    let _ = env_logger::try_init();
    let symbols: SymbolTable = vec!["a", "b"].into_iter().collect();
    let mut buffer = ValueBuffer::new();
    buffer.push_raw(IonType::Symbol, &[0x01]);
    buffer.push_raw(IonType::Symbol, &[0x09]);
    buffer.push_raw(IonType::String, b"b");
    let values = buffer.values();
    let mut batch = LaneBatch::new(buffer.bytes(), buffer.bytes());
    batch.push(values[0], values[2]).unwrap();
    batch.push(values[1], values[2]).unwrap();

    let output = cmpv(&batch, ComparePolicy::MatchingType, &symbols).unwrap();
    assert_eq!(output.result(0), Some(0));
    assert_eq!(output.result(1), None);

    let strict = ValueComparator::new(Options { unknown_symbols: UnknownSymbols::Fail, ..Options::default() });
    assert_eq!(
        strict.compare(&batch, ComparePolicy::MatchingType, &symbols),
        Err(CompareError::SymbolOutOfRange { lane: 1, id: 9, symbols: 2 })
    );
}

#[test]
fn test_active_mask_narrows() {
    let mut symbols = SymbolTable::new();
    let left = encode(&[int(1), int(2), string("a"), Val::Null], &mut symbols);
    let right = encode(&[int(2), int(2), int(3), Val::Null], &mut symbols);
    let batch = batch(&left, &right).with_active(LaneMask::new(0b1101));
    let output = cmpv(&batch, ComparePolicy::MatchingType, &symbols).unwrap();
    assert_eq!(output.mask, LaneMask::new(0b1001));
    assert!(output.mask.is_subset_of(batch.active()));
    assert_eq!(output.result(0), Some(-1));
    assert_eq!(output.result(1), None);
    assert_eq!(output.results[1], 0);
}

#[test]
fn test_batch_size_independence() {
    let mut symbols = SymbolTable::new();
    let left_values = vec![
        int(1), float(2.5), string("abc"), sym("abc"), Val::Null, Val::Bool(true), string(&"q".repeat(70)),
        int(-9), ts("2020-02-02T02:02:02Z"), string(""), int(4), float(-1.0), string("xy"), sym("k"), int(0),
        string("zzzzzzzzzz"),
    ];
    let right_values = vec![
        int(1), int(2), string("abd"), string("abc"), int(3), Val::Bool(false), string(&"q".repeat(71)),
        float(-9.5), ts("2020-02-02T02:02:01Z"), Val::Null, sym("k"), float(-1.0), string("x"), sym("j"),
        Val::Bool(false), string("zzzzzzzzzy"),
    ];
    let left = encode(&left_values, &mut symbols);
    let right = encode(&right_values, &mut symbols);
    let full = cmpv(&batch(&left, &right), ComparePolicy::SortNullsFirst, &symbols).unwrap();
    for lane in 0..LANES {
        let mut single = LaneBatch::new(left.bytes(), right.bytes());
        single.push(left.values()[lane], right.values()[lane]).unwrap();
        let output = cmpv(&single, ComparePolicy::SortNullsFirst, &symbols).unwrap();
        assert_eq!(output.result(0), full.result(lane), "lane {}", lane);
    }
}

#[test]
fn test_threshold_independence() {
    let mut symbols = SymbolTable::new();
    let words: Vec<Val> = (0..LANES).map(|i| string(&format!("{}{}", "w".repeat(i * 5), i % 3))).collect();
    let others: Vec<Val> = (0..LANES).map(|i| string(&format!("{}{}", "w".repeat(i * 5), i % 4))).collect();
    let left = encode(&words, &mut symbols);
    let right = encode(&others, &mut symbols);
    let batch = batch(&left, &right);
    let expected = ValueComparator::new(Options { scalar_lane_threshold: LANES, ..Options::default() })
        .compare(&batch, ComparePolicy::MatchingType, &symbols)
        .unwrap();
    for threshold in 0..LANES {
        let comparator = ValueComparator::new(Options { scalar_lane_threshold: threshold, ..Options::default() });
        let output = comparator.compare(&batch, ComparePolicy::MatchingType, &symbols).unwrap();
        assert_eq!(output, expected, "threshold {}", threshold);
    }
}

#[test]
fn test_immediates() {
    let mut symbols = SymbolTable::new();
    let buffer = encode(&[int(10), float(2.5), int(-4), string("10"), Val::Null, float(10.0)], &mut symbols);
    let values = ValueLanes::from_slice(buffer.bytes(), buffer.values()).unwrap();
    let comparator = ValueComparator::default();

    let output = comparator.compare_i64_imm(&values, LaneMask::ALL, 3);
    assert_eq!(output.mask, LaneMask::new(0b100111));
    assert_eq!(&output.results[..6], &[1, -1, -1, 0, 0, 1]);

    let output = comparator.compare_f64_imm(&values, LaneMask::new(0b100001), 10.0);
    assert_eq!(output.mask, LaneMask::new(0b100001));
    assert_eq!(output.result(0), Some(0));
    assert_eq!(output.result(5), Some(0));
}

#[test]
fn test_descriptors_are_validated() {
    let buf = [0x83, b'a', b'b', b'c'];
    let mut batch = LaneBatch::new(&buf, &buf);
    let result = batch.push(ValueRef::new(0, 1, 3, 0x83), ValueRef::new(0, 2, 3, 0x83));
    assert_eq!(result, Err(CompareError::OutOfBounds { lane: 0, offset: 2, end: 5, buffer_len: 4 }));
    assert!(batch.is_empty());
}

#[test]
fn test_read_and_compare() {
    let buf = hex::decode("2105213f8361626383616264").unwrap();
    let values = ion::read_values(&buf).unwrap();
    assert_eq!(values.len(), 4);
    let mut batch = LaneBatch::new(&buf, &buf);
    batch.push(values[0], values[1]).unwrap();
    batch.push(values[2], values[3]).unwrap();
    let output = cmpv(&batch, ComparePolicy::MatchingType, &SymbolTable::new()).unwrap();
    assert_eq!(output.result(0), Some(-1));
    assert_eq!(output.result(1), Some(-1));
}
