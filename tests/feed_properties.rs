//! Model-based properties of the status feed: an update only ever rewrites
//! the entry it was issued for, and the feed only shrinks on clear.

use proptest::prelude::*;

use soundboard::status::{EntryToken, StatusFeed};

#[derive(Debug, Clone)]
enum Op {
    Begin,
    Update(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Begin),
        4 => (0..64usize).prop_map(Op::Update),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn feed_matches_a_simple_model(ops in proptest::collection::vec(op_strategy(), 1..100)) {
        let feed = StatusFeed::new();
        // Mirror of what the feed should hold, newest first.
        let mut model: Vec<(EntryToken, String)> = Vec::new();
        let mut stamp = 0u32;
        let mut prev_len = 0usize;

        for op in ops {
            let cleared = matches!(op, Op::Clear);
            match op {
                Op::Begin => {
                    let text = format!("entry {stamp}");
                    let token = feed.begin(text.clone());
                    model.insert(0, (token, text));
                    stamp += 1;
                }
                Op::Update(pick) => {
                    if !model.is_empty() {
                        let idx = pick % model.len();
                        let text = format!("rewrite {stamp}");
                        feed.update(model[idx].0, text.clone());
                        model[idx].1 = text;
                        stamp += 1;
                    }
                }
                Op::Clear => {
                    feed.clear();
                    model.clear();
                }
            }

            let snapshot = feed.snapshot();
            prop_assert!(
                cleared || snapshot.len() >= prev_len,
                "feed shrank without a clear"
            );
            prev_len = snapshot.len();

            let expected: Vec<String> = model.iter().map(|(_, t)| t.clone()).collect();
            prop_assert_eq!(snapshot, expected);
        }
    }
}
