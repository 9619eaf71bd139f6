//! Random graphs, including shared nodes and cycles, survive a round trip.

use proptest::prelude::*;
use tangle_codec::{Codec, Graph, Node, NodeId, isomorphic};

#[derive(Debug, Clone)]
enum Shape {
	None,
	Bool(bool),
	Int(i64),
	Text(String),
	Bytes(Vec<u8>),
	/// Child positions, taken modulo the node count.
	List(Vec<usize>),
	Map(Vec<(usize, usize)>),
}

fn shape() -> impl Strategy<Value = Shape> {
	prop_oneof![
		Just(Shape::None),
		any::<bool>().prop_map(Shape::Bool),
		any::<i64>().prop_map(Shape::Int),
		".{0,8}".prop_map(Shape::Text),
		prop::collection::vec(any::<u8>(), 0..8).prop_map(Shape::Bytes),
		prop::collection::vec(any::<usize>(), 0..4).prop_map(Shape::List),
		prop::collection::vec((any::<usize>(), any::<usize>()), 0..3).prop_map(Shape::Map),
	]
}

/// Builds every node first, then wires containers, so any node may point at any other.
fn build(shapes: &[Shape]) -> (Graph, NodeId) {
	let mut graph = Graph::new();
	let ids: Vec<NodeId> = shapes
		.iter()
		.map(|shape| match shape {
			Shape::None => graph.none(),
			Shape::Bool(b) => graph.bool(*b),
			Shape::Int(i) => graph.int(*i),
			Shape::Text(s) => graph.text(s.as_str()),
			Shape::Bytes(b) => graph.bytes(b.clone()),
			Shape::List(_) => graph.list([]),
			Shape::Map(_) => graph.map([]),
		})
		.collect();
	let at = |i: usize| ids[i % ids.len()];
	for (shape, &id) in shapes.iter().zip(&ids) {
		match shape {
			Shape::List(items) => {
				for &item in items {
					graph.list_push(id, at(item)).unwrap();
				}
			}
			Shape::Map(entries) => {
				for &(key, value) in entries {
					graph.map_insert(id, at(key), at(value)).unwrap();
				}
			}
			_ => {}
		}
	}
	(graph, ids[0])
}

proptest! {
	#[test]
	fn roundtrip_is_isomorphic(shapes in prop::collection::vec(shape(), 1..16)) {
		let codec = Codec::standard();
		let (graph, root) = build(&shapes);
		let bytes = codec.pack(&graph, root).unwrap();
		let (decoded, decoded_root) = codec.unpack(&bytes).unwrap();
		prop_assert!(isomorphic(&graph, root, &decoded, decoded_root));
		prop_assert_eq!(codec.pack(&decoded, decoded_root).unwrap(), bytes);
	}

	#[test]
	fn decoded_graph_holds_only_reachable_nodes(shapes in prop::collection::vec(shape(), 1..16)) {
		let codec = Codec::standard();
		let (graph, root) = build(&shapes);
		let (decoded, _) = codec.unpack(&codec.pack(&graph, root).unwrap()).unwrap();

		let mut seen = vec![false; graph.len()];
		let mut stack = vec![root];
		while let Some(id) = stack.pop() {
			if std::mem::replace(&mut seen[id.index()], true) {
				continue;
			}
			stack.extend(graph.get(id).map(Node::children).unwrap_or_default());
		}
		prop_assert_eq!(decoded.len(), seen.iter().filter(|s| **s).count());
	}

	#[test]
	fn garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
		let _ = Codec::standard().unpack(&bytes);
	}
}
