use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::VecDeque;

fn validate_deque<T, const B: usize>(d: &BlockDeque<T, B>) {
    let (start, end) = (d.start, d.end);
    assert!(start.block <= end.block, "start block past end block");
    assert!(end.block < d.map.len(), "end block outside the map");
    assert!(start.offset <= B && end.offset <= B, "offset past block size");
    if start.block == end.block {
        assert!(start.offset <= end.offset, "cursors crossed inside one block");
    } else {
        assert!(start.offset < B, "front block has no live element");
        assert!(end.offset > 0, "back block has no live element");
    }

    for (i, slot) in d.map.iter().enumerate() {
        let live = (start.block..=end.block).contains(&i);
        assert_eq!(slot.is_some(), live, "map slot {i} ownership mismatch");
        if let Some(block) = slot {
            assert_eq!(block.slots.len(), B);
        }
    }

    // Walk every live block and count occupied slots against the cursors.
    let mut walked = 0usize;
    for b in start.block..=end.block {
        let block = d.map[b].as_ref().unwrap();
        let lo = if b == start.block { start.offset } else { 0 };
        let hi = if b == end.block { end.offset } else { B };
        for (off, slot) in block.slots.iter().enumerate() {
            let inside = off >= lo && off < hi;
            assert_eq!(slot.is_some(), inside, "slot {b}:{off} occupancy mismatch");
            walked += usize::from(inside);
        }
    }
    assert_eq!(walked, d.count, "cursor span must match element count");
    assert_eq!(d.capacity(), (end.block - start.block + 1) * B);
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 3)]
    PushBack(u16),
    #[proptest(weight = 3)]
    PushFront(u16),
    #[proptest(weight = 2)]
    PopBack,
    #[proptest(weight = 2)]
    PopFront,
    Front,
    Back,
    Get(u16),
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=2000)
}

fn check_ops<const B: usize>(ops: Vec<Op>, map_len: usize) -> std::result::Result<(), TestCaseError> {
    let mut d: BlockDeque<u16, B> = BlockDeque::with_map_len(map_len);
    let mut m: VecDeque<u16> = VecDeque::new();

    for op in ops {
        match op {
            Op::PushBack(v) => {
                d.push_back(v);
                m.push_back(v);
            }
            Op::PushFront(v) => {
                d.push_front(v);
                m.push_front(v);
            }
            Op::PopBack => prop_assert_eq!(d.pop_back().ok(), m.pop_back()),
            Op::PopFront => prop_assert_eq!(d.pop_front().ok(), m.pop_front()),
            Op::Front => prop_assert_eq!(d.front().ok(), m.front()),
            Op::Back => prop_assert_eq!(d.back().ok(), m.back()),
            Op::Get(i) => {
                let i = usize::from(i) % (m.len() + 1);
                prop_assert_eq!(d.get(i), m.get(i));
            }
            Op::Clear => {
                d.clear();
                m.clear();
            }
        }

        prop_assert_eq!(d.len(), m.len());
        validate_deque(&d);
    }

    prop_assert!(d.iter().eq(m.iter()));
    prop_assert!(d.iter().rev().eq(m.iter().rev()));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_default_block(ops in ops_strategy()) {
        check_ops::<DEFAULT_BLOCK_SIZE>(ops, INITIAL_MAP_LEN)?;
    }

    #[test]
    fn prop_equivalence_small_block(ops in ops_strategy(), map_len in 0usize..6) {
        check_ops::<3>(ops, map_len)?;
    }

    #[test]
    fn prop_equivalence_unit_block(ops in ops_strategy()) {
        check_ops::<1>(ops, 2)?;
    }

    #[test]
    fn prop_fifo_and_lifo_order(values in prop::collection::vec(any::<i32>(), 0..600), front in any::<bool>()) {
        let mut d: BlockDeque<i32, 4> = BlockDeque::new();
        for &v in &values {
            if front { d.push_front(v) } else { d.push_back(v) }
        }

        let pop_same = |d: &mut BlockDeque<i32, 4>| if front { d.pop_front() } else { d.pop_back() };
        let pop_opposite = |d: &mut BlockDeque<i32, 4>| if front { d.pop_back() } else { d.pop_front() };

        // Opposite end gives insertion order.
        let mut fifo = d.clone();
        let mut got = Vec::new();
        while let Ok(v) = pop_opposite(&mut fifo) {
            got.push(v);
        }
        prop_assert_eq!(&got, &values);

        // Same end gives reverse insertion order.
        let mut got = Vec::new();
        while let Ok(v) = pop_same(&mut d) {
            got.push(v);
        }
        got.reverse();
        prop_assert_eq!(&got, &values);
        prop_assert_eq!(d.len(), 0);
        validate_deque(&d);
    }

    #[test]
    fn prop_clone_independent(ops in ops_strategy(), extra in prop::collection::vec(any::<u16>(), 1..200)) {
        let mut original: BlockDeque<u16, 4> = BlockDeque::new();
        for op in ops {
            match op {
                Op::PushBack(v) => original.push_back(v),
                Op::PushFront(v) => original.push_front(v),
                Op::PopBack => { let _ = original.pop_back(); }
                Op::PopFront => { let _ = original.pop_front(); }
                _ => {}
            }
        }
        let snapshot: Vec<u16> = original.iter().copied().collect();

        let mut copy = original.clone();
        for &v in &extra {
            copy.push_back(v);
            copy.push_front(v);
            let _ = copy.pop_front();
        }
        validate_deque(&copy);
        prop_assert!(original.iter().copied().eq(snapshot.iter().copied()));

        let copy_before: Vec<u16> = copy.iter().copied().collect();
        original.clear();
        prop_assert!(copy.iter().copied().eq(copy_before.into_iter()));
    }
}

#[test]
fn exhaustive_short_sequences() {
    // Every push/pop sequence of length 8 over both ends, with a 2-slot block.
    let ops = [Op::PushBack(0), Op::PushFront(0), Op::PopBack, Op::PopFront];
    for code in 0..4usize.pow(8) {
        let mut seq = Vec::with_capacity(8);
        let mut c = code;
        for i in 0..8u16 {
            let op = match ops[c % 4] {
                Op::PushBack(_) => Op::PushBack(i),
                Op::PushFront(_) => Op::PushFront(i),
                ref other => other.clone(),
            };
            seq.push(op);
            c /= 4;
        }
        check_ops::<2>(seq, 2).unwrap();
    }
}
