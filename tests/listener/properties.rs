//! Property tests over arbitrary commit sequences

use crate::*;
use proptest::prelude::*;

/// (event count, document count) per commit
fn commit_shapes() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..6, 0usize..6), 0..20)
}

fn deliver(listener: &CommitListener, shapes: &[(usize, usize)]) {
    let mut tag = 0u32;
    for &(events, documents) in shapes {
        let mut commit = ChangeSet::new();
        for _ in 0..events {
            commit = commit.with_event(Event::new("prop", FooCreated { id: tag }));
            tag += 1;
        }
        for _ in 0..documents {
            commit = commit.with_updated(Foo::new(tag));
            tag += 1;
        }
        listener.after_commit(&SessionInfo::default(), &commit);
    }
}

proptest! {
    #[test]
    fn event_count_is_sum_of_commit_events(shapes in commit_shapes()) {
        let listener = CommitListener::new("prop");
        deliver(&listener, &shapes);

        let expected: usize = shapes.iter().map(|(e, _)| e).sum();
        prop_assert_eq!(listener.event_count(), expected);
    }

    #[test]
    fn document_count_is_sum_of_commit_documents(shapes in commit_shapes()) {
        let listener = CommitListener::new("prop");
        deliver(&listener, &shapes);

        let expected: usize = shapes.iter().map(|(_, d)| d).sum();
        prop_assert_eq!(listener.document_count(), expected);
    }

    #[test]
    fn recorded_order_follows_delivery_order(shapes in commit_shapes()) {
        let listener = CommitListener::new("prop");
        deliver(&listener, &shapes);

        // tags are handed out in delivery order, so both sequences must be increasing
        let event_tags: Vec<u32> = listener
            .events_of::<FooCreated>()
            .iter()
            .map(|e| e.id)
            .collect();
        prop_assert!(event_tags.windows(2).all(|w| w[0] < w[1]));

        let doc_tags: Vec<u32> = listener.documents_of::<Foo>().iter().map(|f| f.id).collect();
        prop_assert!(doc_tags.windows(2).all(|w| w[0] < w[1]));
    }
}
