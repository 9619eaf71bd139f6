use pretty_assertions::assert_eq;
use tangle_graph::{Node, TypeTag};

use super::*;
use crate::registry::RegistryBuilder;

fn packer() -> Packer {
	Packer::new(Arc::new(TypeRegistry::standard()))
}

#[test]
fn single_atom() {
	let mut graph = Graph::new();
	let root = graph.int(-1);
	assert_eq!(
		packer().pack(&graph, root).unwrap(),
		vec![0x80, 0x81, 0x83, 0x80, 0x82, 0x00, 0xff]
	);
}

#[test]
fn map_children_complete_before_the_map() {
	let mut graph = Graph::new();
	let key = graph.text("a");
	let value = graph.int(1);
	let root = graph.map([(key, value)]);
	assert_eq!(
		packer().pack(&graph, root).unwrap(),
		vec![
			0x82, 0x83, 0x8c, // root 2, 3 type bytes, 12 data bytes
			0x82, 0x80, 0x86, // text, int, map
			0x82, 0x00, 0x61, // "a"
			0x82, 0x00, 0x01, // 1
			0x85, 0x01, 0x81, 0x81, 0x80, 0x81, // one entry: key @0, value @1
		]
	);
}

#[test]
fn self_referencing_list_is_one_record() {
	let mut graph = Graph::new();
	let root = graph.list([]);
	graph.list_push(root, root).unwrap();
	assert_eq!(
		packer().pack(&graph, root).unwrap(),
		vec![0x80, 0x81, 0x84, 0x85, 0x83, 0x01, 0x80, 0x80]
	);
}

#[test]
fn shared_map_is_written_once() {
	let mut graph = Graph::new();
	let shared = graph.map([]);
	let root = graph.list([shared, shared]);
	assert_eq!(
		packer().pack(&graph, root).unwrap(),
		vec![
			0x81, 0x82, 0x89, // root 1
			0x86, 0x85, // map, list
			0x83, 0x01, 0x81, 0x80, // empty map
			0x84, 0x01, 0x80, 0x80, 0x80, // list of @0, @0
		]
	);
}

#[test]
fn equal_but_distinct_atoms_are_separate_records() {
	let mut graph = Graph::new();
	let a = graph.int(7);
	let b = graph.int(7);
	let root = graph.list([a, b, a]);

	let packer = packer();
	let mut session = PackSession::new();
	let token = packer.pack_into(&graph, root, &mut session).unwrap();
	assert_eq!(session.len(), 3);
	assert_ne!(session.token_of(a), session.token_of(b));
	assert_eq!(session.token_of(root), Some(token));
}

#[test]
fn sessions_are_independent() {
	let mut graph = Graph::new();
	let x = graph.int(1);
	let y = graph.int(2);
	let packer = packer();
	assert_eq!(packer.pack(&graph, y).unwrap(), packer.pack(&graph, y).unwrap());

	let mut first = PackSession::new();
	packer.pack_into(&graph, x, &mut first).unwrap();
	let mut second = PackSession::new();
	let token = packer.pack_into(&graph, y, &mut second).unwrap();
	assert_eq!(token.index(), 0);
}

#[test]
fn several_roots_share_a_session() {
	let mut graph = Graph::new();
	let shared = graph.text("shared");
	let left = graph.list([shared]);
	let right = graph.list([shared]);

	let packer = packer();
	let mut session = PackSession::new();
	packer.pack_into(&graph, left, &mut session).unwrap();
	let right_token = packer.pack_into(&graph, right, &mut session).unwrap();
	assert_eq!(session.len(), 3);

	let bytes = packer.finalize(right_token, session).unwrap();
	// Dense order: "shared", left, right.
	assert_eq!(&bytes[..6], &[0x82, 0x83, 0x90, 0x82, 0x85, 0x85]);
}

#[test]
fn unregistered_tag_fails_without_output() {
	let mut graph = Graph::new();
	let atom = graph.int(1);
	let root = graph.tagged(TypeTag::new("point"), vec![], [atom]);
	let outer = graph.list([atom, root]);
	assert_eq!(
		packer().pack(&graph, outer),
		Err(Error::UnregisteredType(Unregistered::Tag(TypeTag::new("point"))))
	);
}

#[test]
fn tagged_containers_need_registration() {
	let point = TypeTag::new("point");
	let mut builder = RegistryBuilder::standard();
	builder.tagged(point);
	let packer = Packer::new(Arc::new(builder.build().unwrap()));

	let mut graph = Graph::new();
	let x = graph.int(1);
	let root = graph.tagged(point, vec![0x02], [x, x]);
	assert_eq!(
		packer.pack(&graph, root).unwrap(),
		vec![
			0x81, 0x82, 0x89, // root 1
			0x80, 0x87, // int, point
			0x82, 0x00, 0x01, // 1
			0x85, 0x01, 0x81, 0x02, 0x80, 0x80, // header [02], children @0 @0
		]
	);
}

#[test]
fn depth_limit_is_enforced() {
	let mut graph = Graph::new();
	let mut node = graph.none();
	for _ in 0..10 {
		node = graph.list([node]);
	}
	let registry = Arc::new(TypeRegistry::standard());

	let shallow = Packer::with_config(registry.clone(), CodecConfig::default().with_max_depth(9));
	assert_eq!(shallow.pack(&graph, node), Err(Error::DepthExceeded { limit: 9 }));

	let enough = Packer::with_config(registry, CodecConfig::default().with_max_depth(10));
	assert!(enough.pack(&graph, node).is_ok());
}

#[test]
fn foreign_root_is_unknown() {
	let graph = Graph::new();
	let mut other = Graph::new();
	let id = other.none();
	assert_eq!(packer().pack(&graph, id), Err(Error::UnknownNode(id)));
}

#[test]
fn failed_session_cannot_be_finalized() {
	let mut graph = Graph::new();
	let bad = graph.tagged(TypeTag::new("nope"), vec![], []);
	let root = graph.list([bad]);

	let packer = packer();
	let mut session = PackSession::new();
	assert!(packer.pack_into(&graph, root, &mut session).is_err());
	let token = session.token_of(root).unwrap();
	assert_eq!(packer.finalize(token, session), Err(Error::Incomplete { token }));
}

#[test]
fn handler_shape_errors_propagate() {
	let mut builder = RegistryBuilder::new();
	builder.atom(TypeTag::LIST, crate::atom::IntCodec);
	let packer = Packer::new(Arc::new(builder.build().unwrap()));
	let mut graph = Graph::new();
	let root = graph.push(Node::List(vec![]));
	assert_eq!(
		packer.pack(&graph, root),
		Err(Error::KindMismatch {
			tag: TypeTag::INT,
			found: TypeTag::LIST,
		})
	);
}
