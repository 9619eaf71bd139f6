//! Structural comparison that respects sharing.

use rustc_hash::FxHashMap as HashMap;

use crate::{Graph, Node, NodeId};

/// Returns true if the graph reachable from `a_root` in `a` has the same shape as
/// the one reachable from `b_root` in `b`.
///
/// Atoms compare by value and containers compare element-wise, but the node
/// correspondence must also be one-to-one: a node referenced twice on one side has
/// to match a single node referenced twice on the other side. Cycles are handled by
/// recording each pair before visiting its children. Ids missing from their graph
/// compare unequal.
pub fn isomorphic(a: &Graph, a_root: NodeId, b: &Graph, b_root: NodeId) -> bool {
	let mut forward: HashMap<NodeId, NodeId> = HashMap::default();
	let mut backward: HashMap<NodeId, NodeId> = HashMap::default();
	let mut stack = vec![(a_root, b_root)];

	while let Some((x, y)) = stack.pop() {
		match (forward.get(&x), backward.get(&y)) {
			(Some(&fx), Some(&by)) if fx == y && by == x => continue,
			(None, None) => {}
			_ => return false,
		}
		forward.insert(x, y);
		backward.insert(y, x);

		let (Some(nx), Some(ny)) = (a.get(x), b.get(y)) else {
			return false;
		};
		if !same_shell(nx, ny) {
			return false;
		}
		let (cx, cy) = (nx.children(), ny.children());
		stack.extend(cx.into_iter().zip(cy).rev());
	}
	true
}

/// Compares everything but child identity.
fn same_shell(x: &Node, y: &Node) -> bool {
	match (x, y) {
		(Node::List(a), Node::List(b)) => a.len() == b.len(),
		(Node::Map(a), Node::Map(b)) => a.len() == b.len(),
		(
			Node::Tagged {
				tag: ta,
				header: ha,
				children: ca,
			},
			Node::Tagged {
				tag: tb,
				header: hb,
				children: cb,
			},
		) => ta == tb && ha == hb && ca.len() == cb.len(),
		_ => !x.is_container() && x == y,
	}
}
