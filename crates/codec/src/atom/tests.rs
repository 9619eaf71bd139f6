use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

#[rstest]
#[case(0, &[0x00])]
#[case(1, &[0x01])]
#[case(-1, &[0xff])]
#[case(127, &[0x7f])]
#[case(128, &[0x00, 0x80])]
#[case(-128, &[0xff, 0x80])]
#[case(-129, &[0xff, 0x7f])]
#[case(255, &[0x00, 0xff])]
#[case(256, &[0x01, 0x00])]
#[case(-32768, &[0xff, 0x80, 0x00])]
fn int_boundaries(#[case] value: i64, #[case] bytes: &[u8]) {
	assert_eq!(encode_int(value), bytes);
	assert_eq!(decode_int(bytes), Ok(value));
}

#[test]
fn whole_byte_magnitudes_keep_a_sign_byte() {
	for bits in (8..=56).step_by(8) {
		let value = (1i64 << bits) - 1;
		assert_eq!(encode_int(value).len(), bits / 8 + 1);
		assert_eq!(encode_int(-value).len(), bits / 8 + 1);
	}
}

#[test]
fn extremes() {
	assert_eq!(encode_int(i64::MAX), i64::MAX.to_be_bytes().to_vec());
	let min = encode_int(i64::MIN);
	assert_eq!(min.len(), 9);
	assert_eq!(&min[..2], &[0xff, 0x80]);
	assert_eq!(decode_int(&min), Ok(i64::MIN));
}

#[test]
fn long_encodings() {
	assert_eq!(decode_int(&[]), Ok(0));
	assert_eq!(decode_int(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05]), Ok(5));
	assert_eq!(decode_int(&[0xff; 12]), Ok(-1));
	assert!(matches!(
		decode_int(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
		Err(Error::InvalidEncoding { tag: TypeTag::INT, .. })
	));
	// Positive 2^63 needs nine bytes and does not fit.
	assert!(decode_int(&[0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).is_err());
}

#[test]
fn bools_are_small_ints() {
	assert_eq!(BoolCodec.encode(&Node::Bool(true)), Ok(vec![0x01]));
	assert_eq!(BoolCodec.encode(&Node::Bool(false)), Ok(vec![0x00]));
	assert_eq!(BoolCodec.decode(&[0x00, 0x02]), Ok(Node::Bool(true)));
	assert_eq!(BoolCodec.decode(&[0x00]), Ok(Node::Bool(false)));
}

#[test]
fn text_is_plain_utf8() {
	let node = Node::Text("héllo".into());
	let raw = TextCodec.encode(&node).unwrap();
	assert_eq!(raw, "héllo".as_bytes());
	assert_eq!(TextCodec.decode(&raw), Ok(node));
	assert!(matches!(
		TextCodec.decode(&[0xc3, 0x28]),
		Err(Error::InvalidEncoding { tag: TypeTag::TEXT, .. })
	));
}

#[test]
fn none_and_bytes() {
	assert_eq!(NoneCodec.encode(&Node::None), Ok(vec![0x00]));
	assert_eq!(NoneCodec.decode(&[0x00]), Ok(Node::None));
	assert_eq!(NoneCodec.decode(&[]), Ok(Node::None));
	let raw = vec![0x00, 0xff, 0x80];
	assert_eq!(BytesCodec.encode(&Node::Bytes(raw.clone())), Ok(raw.clone()));
	assert_eq!(BytesCodec.decode(&raw), Ok(Node::Bytes(raw)));
}

#[test]
fn wrong_node_kind() {
	assert_eq!(
		IntCodec.encode(&Node::Text("1".into())),
		Err(Error::KindMismatch {
			tag: TypeTag::INT,
			found: TypeTag::TEXT,
		})
	);
	assert!(TextCodec.encode(&Node::List(vec![])).is_err());
}

proptest! {
	#[test]
	fn int_roundtrip(value in any::<i64>()) {
		let raw = encode_int(value);
		prop_assert_eq!(raw.len(), int_len(value));
		prop_assert_eq!(decode_int(&raw), Ok(value));
	}
}
