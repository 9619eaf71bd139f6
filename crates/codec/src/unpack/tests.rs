use pretty_assertions::assert_eq;
use tangle_graph::{Node, TypeTag};

use super::*;
use crate::pack::Packer;

fn unpacker() -> Unpacker {
	Unpacker::new(Arc::new(TypeRegistry::standard()))
}

fn token(index: u64) -> Token {
	Token::from_index(index).unwrap()
}

const SELF_LIST: &[u8] = &[0x80, 0x81, 0x84, 0x85, 0x83, 0x01, 0x80, 0x80];

#[test]
fn split_does_not_decode() {
	let unpacker = unpacker();
	let (root, session) = unpacker.split(SELF_LIST).unwrap();
	assert_eq!(root, token(0));
	assert_eq!(session.len(), 1);
	assert_eq!(session.type_code(root), Some(5));
	assert!(!session.is_resolved(root));
}

#[test]
fn self_reference_resolves_to_itself() {
	let (graph, root) = unpacker().unpack(SELF_LIST).unwrap();
	assert_eq!(graph.len(), 1);
	assert_eq!(graph.get(root), Some(&Node::List(vec![root])));
}

#[test]
fn unreachable_records_stay_raw() {
	let bytes = [0x80, 0x82, 0x86, 0x80, 0x80, 0x82, 0x00, 0x01, 0x82, 0x00, 0x02];
	let unpacker = unpacker();
	let (root, mut session) = unpacker.split(&bytes).unwrap();
	let mut graph = Graph::new();
	let id = unpacker.unpack_token(root, &mut session, &mut graph).unwrap();
	assert_eq!(graph.get(id), Some(&Node::Int(1)));
	assert_eq!(graph.len(), 1);
	assert_eq!(session.resolved(root), Some(id));
	assert!(!session.is_resolved(token(1)));
}

#[test]
fn resolving_several_tokens_shares_nodes() {
	let mut source = Graph::new();
	let shared = source.text("s");
	let root = source.list([shared, shared]);
	let bytes = Packer::new(Arc::new(TypeRegistry::standard())).pack(&source, root).unwrap();

	let unpacker = unpacker();
	let (root, mut session) = unpacker.split(&bytes).unwrap();
	let mut graph = Graph::new();
	let text = unpacker.unpack_token(token(0), &mut session, &mut graph).unwrap();
	let list = unpacker.unpack_token(root, &mut session, &mut graph).unwrap();
	assert_eq!(graph.get(list), Some(&Node::List(vec![text, text])));
	assert_eq!(graph.len(), 2);
	assert_eq!(unpacker.unpack_token(root, &mut session, &mut graph), Ok(list));
	assert_eq!(
		unpacker.unpack_token(token(2), &mut session, &mut graph),
		Err(Error::UnknownToken(token(2)))
	);
}

#[test]
fn unknown_code_is_unregistered() {
	let bytes = [0x80, 0x81, 0x82, 0x89, 0x81, 0x00];
	assert_eq!(
		unpacker().unpack(&bytes),
		Err(Error::UnregisteredType(Unregistered::Code {
			code: 9,
			token: token(0),
		}))
	);
}

#[test]
fn framing_must_match_handler_kind() {
	let bytes = [0x80, 0x81, 0x82, 0x85, 0x81, 0x00];
	assert_eq!(
		unpacker().unpack(&bytes),
		Err(Error::RecordKind {
			token: token(0),
			tag: TypeTag::LIST,
			expected: "a container",
			found: "an atom",
		})
	);
}

#[test]
fn dangling_child_is_rejected_at_split() {
	let bytes = [0x80, 0x81, 0x84, 0x85, 0x83, 0x01, 0x80, 0x83];
	assert_eq!(
		unpacker().split(&bytes).map(|(root, _)| root),
		Err(Error::Dangling {
			token: token(0),
			child: 3,
		})
	);
}

#[test]
fn root_outside_table_is_malformed() {
	let bytes = [0x81, 0x81, 0x83, 0x80, 0x82, 0x00, 0x01];
	assert!(matches!(
		unpacker().unpack(&bytes),
		Err(Error::Wire(WireError::Malformed { .. }))
	));
	assert!(matches!(
		unpacker().unpack(&[0x80, 0x80, 0x80]),
		Err(Error::Wire(WireError::Malformed { .. }))
	));
}

#[test]
fn truncated_input() {
	assert!(matches!(unpacker().unpack(&[]), Err(Error::Wire(WireError::Truncated { .. }))));
	assert!(matches!(
		unpacker().unpack(&SELF_LIST[..SELF_LIST.len() - 1]),
		Err(Error::Wire(WireError::Truncated { .. }))
	));
}

#[test]
fn invalid_text_is_reported() {
	let bytes = [0x80, 0x81, 0x83, 0x82, 0x82, 0x00, 0xff];
	assert!(matches!(
		unpacker().unpack(&bytes),
		Err(Error::InvalidEncoding { tag: TypeTag::TEXT, .. })
	));
}

#[test]
fn map_child_count_must_match_header() {
	let bytes = [0x81, 0x82, 0x88, 0x80, 0x86, 0x82, 0x00, 0x01, 0x84, 0x01, 0x81, 0x81, 0x80];
	assert!(matches!(
		unpacker().unpack(&bytes),
		Err(Error::InvalidEncoding { tag: TypeTag::MAP, .. })
	));
}

#[test]
fn input_limit() {
	let limited = Unpacker::with_config(
		Arc::new(TypeRegistry::standard()),
		CodecConfig::default().with_max_input_len(4),
	);
	assert_eq!(
		limited.unpack(SELF_LIST),
		Err(Error::InputTooLarge { len: 8, limit: 4 })
	);
}

#[test]
fn depth_limit() {
	let mut source = Graph::new();
	let mut node = source.none();
	for _ in 0..6 {
		node = source.list([node]);
	}
	let registry = Arc::new(TypeRegistry::standard());
	let bytes = Packer::new(registry.clone()).pack(&source, node).unwrap();

	let shallow = Unpacker::with_config(registry.clone(), CodecConfig::default().with_max_depth(5));
	assert_eq!(shallow.unpack(&bytes), Err(Error::DepthExceeded { limit: 5 }));
	let enough = Unpacker::with_config(registry, CodecConfig::default().with_max_depth(6));
	assert!(enough.unpack(&bytes).is_ok());
}
