use kernel_bridge::BooleanKind;
use modeling_ops::{
    execute_boolean, execute_chamfer, execute_fillet, execute_loft, execute_offset, execute_pipe,
    execute_thick_solid, execute_transform, InputShape, KernelBundle, OpError, OpOptions,
    OpOutcome,
};

use crate::types::{Node, NodeKind, Operation, RefField, ShapeTree};

/// Run a node's operation against the current shapes of its inputs.
///
/// Reads children and explicit references from the tree as they are now, so
/// a burst of edits is only ever built in its final state.
pub(crate) fn run_operation(
    tree: &ShapeTree,
    node: &Node,
    kb: &mut dyn KernelBundle,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    let children: Vec<InputShape<'_>> = node
        .children
        .iter()
        .filter_map(|id| tree.get(*id))
        .map(input_of)
        .collect();
    let reference = |field: RefField| {
        node.refs
            .get(&field)
            .and_then(|binding| tree.get(binding.target))
            .map(input_of)
    };

    match &node.operation {
        // Leaves publish their shape from outside; there is nothing to build
        Operation::Leaf { .. } => Ok(OpOutcome::Skipped),

        Operation::Common { params } | Operation::Cut { params } | Operation::Fuse { params } => {
            let kind = match node.operation.kind() {
                NodeKind::Common => BooleanKind::Common,
                NodeKind::Cut => BooleanKind::Cut,
                _ => BooleanKind::Fuse,
            };
            execute_boolean(
                kb,
                kind,
                reference(RefField::Shape1),
                reference(RefField::Shape2),
                &children,
                params,
                options,
            )
        }

        Operation::Fillet { params } => execute_fillet(kb, &children, params, options),
        Operation::Chamfer { params } => execute_chamfer(kb, &children, params, options),
        Operation::Offset { params } => execute_offset(kb, &children, params, options),
        Operation::ThickSolid { params } => execute_thick_solid(kb, &children, params, options),

        Operation::Pipe { params } => execute_pipe(
            kb,
            reference(RefField::Spline),
            reference(RefField::Profile),
            &children,
            params,
            options,
        ),

        Operation::ThruSections { params } => execute_loft(kb, &children, params, options),

        Operation::Transform { params } => {
            execute_transform(kb, reference(RefField::Target), &children, params, options)
        }
    }
}

fn input_of(node: &Node) -> InputShape<'_> {
    InputShape {
        leaf: node.operation.leaf_kind(),
        shape: node.state.shape(),
    }
}
