use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use kernel_bridge::{
    BooleanKind, KernelCall, KernelError, KernelId, KernelIntrospect, KernelOp, MockFailure,
    MockKernel, Shape,
};
use modeling_ops::*;
use shape_types::{FillMode, JoinType, LeafKind, PaveFiller, Transform, TransformOp};

fn opts() -> OpOptions {
    OpOptions::default()
}

fn built(outcome: OpOutcome) -> Shape {
    match outcome {
        OpOutcome::Built(shape) => shape,
        other => panic!("expected a built shape, got {:?}", other),
    }
}

fn square(kernel: &mut MockKernel, label: &str, z: f64) -> Shape {
    kernel.make_wire(
        label,
        &[
            [0.0, 0.0, z],
            [1.0, 0.0, z],
            [1.0, 1.0, z],
            [0.0, 1.0, z],
            [0.0, 0.0, z],
        ],
    )
}

// ── Boolean ────────────────────────────────────────────────────────────────

#[test]
fn boolean_folds_explicit_operands_then_children() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 4.0, 4.0, 4.0);
    let b = k.make_box("B", 1.0, 1.0, 1.0);
    let c = k.make_box("C", 1.0, 1.0, 1.0);
    let d = k.make_box("D", 1.0, 1.0, 1.0);

    let children = [InputShape::built(&c), InputShape::built(&d)];
    let result = execute_boolean(
        &mut k,
        BooleanKind::Cut,
        Some(InputShape::built(&a)),
        Some(InputShape::built(&b)),
        &children,
        &BooleanParams::default(),
        &opts(),
    )
    .unwrap();

    let shape = built(result);
    assert_eq!(k.describe(&shape), Some("cut(cut(cut(A,B),C),D)"));
    assert_eq!(k.count_of(KernelOp::Boolean), 3);
}

#[test]
fn boolean_child_order_changes_result() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 4.0, 4.0, 4.0);
    let b = k.make_box("B", 1.0, 1.0, 1.0);
    let c = k.make_box("C", 1.0, 1.0, 1.0);
    let d = k.make_box("D", 1.0, 1.0, 1.0);

    let forward = built(
        execute_boolean(
            &mut k,
            BooleanKind::Cut,
            Some(InputShape::built(&a)),
            Some(InputShape::built(&b)),
            &[InputShape::built(&c), InputShape::built(&d)],
            &BooleanParams::default(),
            &opts(),
        )
        .unwrap(),
    );
    let reversed = built(
        execute_boolean(
            &mut k,
            BooleanKind::Cut,
            Some(InputShape::built(&a)),
            Some(InputShape::built(&b)),
            &[InputShape::built(&d), InputShape::built(&c)],
            &BooleanParams::default(),
            &opts(),
        )
        .unwrap(),
    );

    assert_ne!(k.describe(&forward), k.describe(&reversed));
}

#[test]
fn boolean_intermediate_results_are_released() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    let b = k.make_box("B", 1.0, 1.0, 1.0);
    let c = k.make_box("C", 1.0, 1.0, 1.0);

    let _result = execute_boolean(
        &mut k,
        BooleanKind::Fuse,
        Some(InputShape::built(&a)),
        Some(InputShape::built(&b)),
        &[InputShape::built(&c)],
        &BooleanParams::default(),
        &opts(),
    )
    .unwrap();

    // Three inputs plus the final result
    assert_eq!(k.live_shapes(), 4);
}

#[test]
fn boolean_with_one_declared_operand_is_cleared() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    let c = k.make_box("C", 1.0, 1.0, 1.0);

    let result = execute_boolean(
        &mut k,
        BooleanKind::Fuse,
        Some(InputShape::built(&a)),
        None,
        &[InputShape::built(&c)],
        &BooleanParams::default(),
        &opts(),
    )
    .unwrap();

    assert!(matches!(result, OpOutcome::Cleared));
    assert_eq!(k.call_count(), 0);
}

#[test]
fn boolean_with_unbuilt_declared_operand_is_cleared() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);

    let result = execute_boolean(
        &mut k,
        BooleanKind::Common,
        Some(InputShape::built(&a)),
        Some(InputShape {
            leaf: None,
            shape: None,
        }),
        &[],
        &BooleanParams::default(),
        &opts(),
    )
    .unwrap();

    assert!(matches!(result, OpOutcome::Cleared));
    assert_eq!(k.call_count(), 0);
}

#[test]
fn boolean_without_declared_operands_reduces_children() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    let b = k.make_box("B", 1.0, 1.0, 1.0);
    let c = k.make_box("C", 1.0, 1.0, 1.0);

    let shape = built(
        execute_boolean(
            &mut k,
            BooleanKind::Common,
            None,
            None,
            &[
                InputShape::built(&a),
                InputShape::built(&b),
                InputShape::built(&c),
            ],
            &BooleanParams::default(),
            &opts(),
        )
        .unwrap(),
    );
    assert_eq!(k.describe(&shape), Some("common(common(A,B),C)"));
}

#[test]
fn boolean_with_single_child_is_cleared() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);

    let result = execute_boolean(
        &mut k,
        BooleanKind::Fuse,
        None,
        None,
        &[InputShape::built(&a)],
        &BooleanParams::default(),
        &opts(),
    )
    .unwrap();

    assert!(matches!(result, OpOutcome::Cleared));
    assert_eq!(k.count_of(KernelOp::Boolean), 0);
}

#[test]
fn boolean_forwards_pave_filler_to_every_call() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    let b = k.make_box("B", 1.0, 1.0, 1.0);
    let c = k.make_box("C", 1.0, 1.0, 1.0);
    let filler = PaveFiller {
        fuzzy_value: 0.01,
        ..PaveFiller::default()
    };

    execute_boolean(
        &mut k,
        BooleanKind::Fuse,
        Some(InputShape::built(&a)),
        Some(InputShape::built(&b)),
        &[InputShape::built(&c)],
        &BooleanParams {
            pave_filler: Some(filler),
        },
        &opts(),
    )
    .unwrap();

    for call in k.calls() {
        match call {
            KernelCall::Boolean { pave_filler, .. } => assert_eq!(*pave_filler, Some(filler)),
            other => panic!("unexpected call {:?}", other),
        }
    }
}

#[test]
fn boolean_unbuilt_child_fails_before_any_kernel_call() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    let b = k.make_box("B", 1.0, 1.0, 1.0);

    let result = execute_boolean(
        &mut k,
        BooleanKind::Cut,
        Some(InputShape::built(&a)),
        Some(InputShape::built(&b)),
        &[InputShape {
            leaf: None,
            shape: None,
        }],
        &BooleanParams::default(),
        &opts(),
    );

    assert_eq!(
        result.unwrap_err(),
        OpError::Configuration(ConfigurationError::InputNotBuilt {
            role: InputRole::Child(0)
        })
    );
    assert_eq!(k.call_count(), 0);
}

// ── Fillet ─────────────────────────────────────────────────────────────────

#[test]
fn fillet_without_child_is_configuration_error() {
    let mut k = MockKernel::new();
    let result = execute_fillet(&mut k, &[], &FilletParams::default(), &opts());
    assert_eq!(
        result.unwrap_err(),
        OpError::Configuration(ConfigurationError::NoChild)
    );
    assert_eq!(k.call_count(), 0);
}

#[test]
fn fillet_defaults_to_every_edge() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 2.0, 2.0, 2.0);
    let params = FilletParams {
        radius: 0.25,
        ..FilletParams::default()
    };

    let shape = built(execute_fillet(&mut k, &[InputShape::built(&a)], &params, &opts()).unwrap());

    match k.last_call() {
        Some(KernelCall::Fillet { edges, .. }) => {
            assert_eq!(edges.len(), 12);
            assert!(edges.iter().all(|e| e.radius == 0.25));
        }
        other => panic!("unexpected call {:?}", other),
    }
    assert_eq!(k.describe(&shape), Some("fillet(A,12)"));
}

#[test]
fn fillet_uses_declared_edges_only() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 2.0, 2.0, 2.0);
    let edges: Vec<KernelId> = k.list_edges(&a).into_iter().take(4).collect();
    let params = FilletParams {
        radius: 0.1,
        edges: edges.clone(),
        ..FilletParams::default()
    };

    execute_fillet(&mut k, &[InputShape::built(&a)], &params, &opts()).unwrap();

    match k.last_call() {
        Some(KernelCall::Fillet { edges: sent, .. }) => {
            let sent: Vec<KernelId> = sent.iter().map(|e| e.edge).collect();
            assert_eq!(sent, edges);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn fillet_rejects_non_positive_radius() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    let params = FilletParams {
        radius: 0.0,
        ..FilletParams::default()
    };
    let result = execute_fillet(&mut k, &[InputShape::built(&a)], &params, &opts());
    assert!(matches!(result, Err(OpError::InvalidParameter { .. })));
}

#[test]
fn fillet_not_done_is_kernel_failure_when_verified() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    k.fail_on(KernelOp::Fillet, MockFailure::NotDone);

    let live_before = k.live_shapes();
    let result = execute_fillet(
        &mut k,
        &[InputShape::built(&a)],
        &FilletParams::default(),
        &opts(),
    );

    assert!(matches!(
        result,
        Err(OpError::Kernel(KernelError::BuildFailed { .. }))
    ));
    assert_eq!(k.live_shapes(), live_before, "failed shape must be released");
}

#[test]
fn fillet_not_done_is_published_when_unverified() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    k.fail_on(KernelOp::Fillet, MockFailure::NotDone);
    let lax = OpOptions {
        verify_kernel_results: false,
        ..OpOptions::default()
    };

    let result = execute_fillet(&mut k, &[InputShape::built(&a)], &FilletParams::default(), &lax);
    assert!(matches!(result, Ok(OpOutcome::Built(_))));
}

// ── Chamfer ────────────────────────────────────────────────────────────────

#[test]
fn chamfer_pairs_stop_at_shorter_list() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 2.0, 2.0, 2.0);
    let edges: Vec<KernelId> = k.list_edges(&a).into_iter().take(3).collect();
    let faces: Vec<KernelId> = k.list_faces(&a).into_iter().take(2).collect();
    let params = ChamferParams {
        distance: 0.2,
        edges: edges.clone(),
        faces: faces.clone(),
        ..ChamferParams::default()
    };

    execute_chamfer(&mut k, &[InputShape::built(&a)], &params, &opts()).unwrap();

    match k.last_call() {
        Some(KernelCall::Chamfer { edges: sent, .. }) => {
            assert_eq!(sent.len(), 2);
            assert_eq!(sent[0].edge, edges[0]);
            assert_eq!(sent[0].face, faces[0]);
            assert_eq!(sent[1].edge, edges[1]);
            assert_eq!(sent[1].face, faces[1]);
            assert!(sent.iter().all(|c| c.edge != edges[2]));
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn chamfer_defaults_pair_all_edges_with_all_faces() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 2.0, 2.0, 2.0);

    execute_chamfer(
        &mut k,
        &[InputShape::built(&a)],
        &ChamferParams::default(),
        &opts(),
    )
    .unwrap();

    match k.last_call() {
        // 12 edges zipped with 6 faces
        Some(KernelCall::Chamfer { edges, .. }) => assert_eq!(edges.len(), 6),
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn chamfer_second_distance_only_when_nonzero() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 2.0, 2.0, 2.0);

    let zero = ChamferParams {
        distance2: Some(0.0),
        ..ChamferParams::default()
    };
    execute_chamfer(&mut k, &[InputShape::built(&a)], &zero, &opts()).unwrap();
    match k.last_call() {
        Some(KernelCall::Chamfer { edges, .. }) => assert!(edges[0].distance2.is_none()),
        other => panic!("unexpected call {:?}", other),
    }

    let asym = ChamferParams {
        distance2: Some(0.3),
        ..ChamferParams::default()
    };
    execute_chamfer(&mut k, &[InputShape::built(&a)], &asym, &opts()).unwrap();
    match k.last_call() {
        Some(KernelCall::Chamfer { edges, .. }) => assert_eq!(edges[0].distance2, Some(0.3)),
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn chamfer_without_child_is_configuration_error() {
    let mut k = MockKernel::new();
    let result = execute_chamfer(&mut k, &[], &ChamferParams::default(), &opts());
    assert!(matches!(
        result,
        Err(OpError::Configuration(ConfigurationError::NoChild))
    ));
}

// ── Offset / ThickSolid ────────────────────────────────────────────────────

#[test]
fn offset_of_wire_builder_takes_planar_path() {
    let mut k = MockKernel::new();
    let w = square(&mut k, "W", 0.0);
    let params = OffsetParams {
        offset: 0.5,
        join: JoinType::Tangent,
        ..OffsetParams::default()
    };

    execute_offset(
        &mut k,
        &[InputShape::leaf(LeafKind::WireBuilder, &w)],
        &params,
        &opts(),
    )
    .unwrap();

    assert_eq!(
        k.last_call(),
        Some(&KernelCall::OffsetCurve {
            wire: w.id(),
            join: JoinType::Tangent,
            distance: 0.5,
        })
    );
}

#[test]
fn offset_of_solid_takes_shape_path_with_default_tolerance() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);

    execute_offset(
        &mut k,
        &[InputShape::built(&a)],
        &OffsetParams::default(),
        &opts(),
    )
    .unwrap();

    match k.last_call() {
        Some(KernelCall::OffsetShape { spec, .. }) => {
            assert_relative_eq!(spec.distance, 1.0);
            assert_relative_eq!(spec.tolerance, 1e-7);
            assert!(!spec.intersection);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn thick_solid_defaults_to_first_face() {
    let mut k = MockKernel::new();
    let a = k.make_box("A", 1.0, 1.0, 1.0);
    let first_face = k.list_faces(&a)[0];

    execute_thick_solid(
        &mut k,
        &[InputShape::built(&a)],
        &ThickSolidParams::default(),
        &opts(),
    )
    .unwrap();

    match k.last_call() {
        Some(KernelCall::ThickSolid { faces, .. }) => assert_eq!(faces, &vec![first_face]),
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn thick_solid_without_faces_skips_without_kernel_call() {
    let mut k = MockKernel::new();
    // A vertex has no faces to close
    let v = k.make_vertex("V", [0.0, 0.0, 0.0]);

    let result = execute_thick_solid(
        &mut k,
        &[InputShape::leaf(LeafKind::Vertex, &v)],
        &ThickSolidParams::default(),
        &opts(),
    )
    .unwrap();

    assert!(matches!(result, OpOutcome::Skipped));
    assert_eq!(k.call_count(), 0);
}

// ── Pipe ───────────────────────────────────────────────────────────────────

#[test]
fn pipe_takes_spline_then_profile_from_children() {
    let mut k = MockKernel::new();
    let path = k.make_wire("S", &[[0.0, 0.0, 0.0], [0.0, 0.0, 5.0]]);
    let profile = k.make_face("P", &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    let shape = built(
        execute_pipe(
            &mut k,
            None,
            None,
            &[InputShape::built(&path), InputShape::built(&profile)],
            &PipeParams {
                fill_mode: Some(FillMode::Frenet),
            },
            &opts(),
        )
        .unwrap(),
    );

    assert_eq!(k.describe(&shape), Some("pipe(S,P)"));
    assert_eq!(
        k.last_call(),
        Some(&KernelCall::Pipe {
            spline: path.id(),
            profile: profile.id(),
            fill_mode: Some(FillMode::Frenet),
        })
    );
}

#[test]
fn pipe_explicit_spline_leaves_first_child_for_profile() {
    let mut k = MockKernel::new();
    let path = k.make_wire("S", &[[0.0, 0.0, 0.0], [0.0, 0.0, 5.0]]);
    let profile = k.make_face("P", &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    let shape = built(
        execute_pipe(
            &mut k,
            Some(InputShape::built(&path)),
            None,
            &[InputShape::built(&profile)],
            &PipeParams::default(),
            &opts(),
        )
        .unwrap(),
    );
    assert_eq!(k.describe(&shape), Some("pipe(S,P)"));
}

#[test]
fn pipe_missing_profile_is_configuration_error() {
    let mut k = MockKernel::new();
    let path = k.make_wire("S", &[[0.0, 0.0, 0.0], [0.0, 0.0, 5.0]]);

    let result = execute_pipe(
        &mut k,
        None,
        None,
        &[InputShape::built(&path)],
        &PipeParams::default(),
        &opts(),
    );
    assert_eq!(
        result.unwrap_err(),
        OpError::Configuration(ConfigurationError::MissingInput {
            role: InputRole::Profile
        })
    );
    assert_eq!(k.call_count(), 0);
}

// ── Loft ───────────────────────────────────────────────────────────────────

#[test]
fn loft_adds_sections_in_order_by_leaf_kind() {
    let mut k = MockKernel::new();
    let bottom = square(&mut k, "W0", 0.0);
    let top = square(&mut k, "W1", 1.0);
    let apex = k.make_vertex("V", [0.5, 0.5, 2.0]);

    let shape = built(
        execute_loft(
            &mut k,
            &[
                InputShape::leaf(LeafKind::Wire, &bottom),
                InputShape::leaf(LeafKind::Wire, &top),
                InputShape::leaf(LeafKind::Vertex, &apex),
            ],
            &LoftParams {
                solid: true,
                ..LoftParams::default()
            },
            &opts(),
        )
        .unwrap(),
    );

    assert_eq!(k.describe(&shape), Some("loft(W0,W1,V)"));
    match k.last_call() {
        Some(KernelCall::Loft { sections, spec }) => {
            assert!(spec.solid);
            let vertex_flags: Vec<bool> = sections.iter().map(|(v, _)| *v).collect();
            assert_eq!(vertex_flags, vec![false, false, true]);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn loft_rejects_non_section_child() {
    let mut k = MockKernel::new();
    let w = square(&mut k, "W0", 0.0);
    let b = k.make_box("B", 1.0, 1.0, 1.0);

    let result = execute_loft(
        &mut k,
        &[
            InputShape::leaf(LeafKind::Wire, &w),
            InputShape::built(&b),
        ],
        &LoftParams::default(),
        &opts(),
    );

    assert_eq!(
        result.unwrap_err(),
        OpError::Configuration(ConfigurationError::UnsupportedSection {
            index: 1,
            kind: None
        })
    );
    assert_eq!(k.call_count(), 0);
}

#[test]
fn loft_without_children_has_no_sections() {
    let mut k = MockKernel::new();
    let result = execute_loft(&mut k, &[], &LoftParams::default(), &opts());
    assert_eq!(
        result.unwrap_err(),
        OpError::Configuration(ConfigurationError::NoSections)
    );
}

// ── Transform ──────────────────────────────────────────────────────────────

#[test]
fn transform_matches_manual_composition() {
    let mut k = MockKernel::new();
    let p = k.make_vertex("P", [1.0, 0.0, 0.0]);
    let params = TransformParams {
        operations: vec![
            TransformOp::translate(1.0, 0.0, 0.0),
            TransformOp::rotate([0.0, 0.0, 1.0], FRAC_PI_2),
        ],
    };

    let shape = built(
        execute_transform(&mut k, None, &[InputShape::built(&p)], &params, &opts()).unwrap(),
    );

    let manual = Transform::translation(1.0, 0.0, 0.0)
        .then(&Transform::rotation_axis_angle([0.0, 0.0, 1.0], FRAC_PI_2));
    let expected = manual.transform_point([1.0, 0.0, 0.0]);
    let actual = k.points(&shape).unwrap()[0];
    for i in 0..3 {
        assert_relative_eq!(actual[i], expected[i], epsilon = 1e-9);
    }
}

#[test]
fn transform_order_is_significant() {
    let mut k = MockKernel::new();
    let p = k.make_vertex("P", [1.0, 0.0, 0.0]);
    let translate = TransformOp::translate(1.0, 0.0, 0.0);
    let rotate = TransformOp::rotate([0.0, 0.0, 1.0], FRAC_PI_2);

    let forward = built(
        execute_transform(
            &mut k,
            None,
            &[InputShape::built(&p)],
            &TransformParams {
                operations: vec![translate, rotate],
            },
            &opts(),
        )
        .unwrap(),
    );
    let swapped = built(
        execute_transform(
            &mut k,
            None,
            &[InputShape::built(&p)],
            &TransformParams {
                operations: vec![rotate, translate],
            },
            &opts(),
        )
        .unwrap(),
    );

    let a = k.points(&forward).unwrap()[0];
    let b = k.points(&swapped).unwrap()[0];
    let dist = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt();
    assert!(dist > 1e-6, "swapping translate and rotate must move the point");
}

#[test]
fn transform_explicit_target_is_copied() {
    let mut k = MockKernel::new();
    let target = k.make_box("T", 1.0, 1.0, 1.0);
    let child = k.make_box("C", 1.0, 1.0, 1.0);

    let shape = built(
        execute_transform(
            &mut k,
            Some(InputShape::built(&target)),
            &[InputShape::built(&child)],
            &TransformParams::default(),
            &opts(),
        )
        .unwrap(),
    );

    assert_eq!(k.describe(&shape), Some("transform(T)"));
    match k.last_call() {
        Some(KernelCall::Transform { copy, shape, .. }) => {
            assert!(*copy);
            assert_eq!(*shape, target.id());
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn transform_first_child_is_not_copied() {
    let mut k = MockKernel::new();
    let child = k.make_box("C", 1.0, 1.0, 1.0);

    execute_transform(
        &mut k,
        None,
        &[InputShape::built(&child)],
        &TransformParams::default(),
        &opts(),
    )
    .unwrap();

    assert!(matches!(
        k.last_call(),
        Some(KernelCall::Transform { copy: false, .. })
    ));
}

#[test]
fn transform_rejects_zero_axis() {
    let mut k = MockKernel::new();
    let child = k.make_box("C", 1.0, 1.0, 1.0);
    let params = TransformParams {
        operations: vec![TransformOp::rotate([0.0, 0.0, 0.0], 1.0)],
    };

    let result = execute_transform(&mut k, None, &[InputShape::built(&child)], &params, &opts());
    assert!(matches!(result, Err(OpError::InvalidParameter { .. })));
    assert_eq!(k.call_count(), 0);
}

#[test]
fn kernel_failure_propagates() {
    let mut k = MockKernel::new();
    let child = k.make_box("C", 1.0, 1.0, 1.0);
    k.fail_on(KernelOp::Transform, MockFailure::Raise);

    let result = execute_transform(
        &mut k,
        None,
        &[InputShape::built(&child)],
        &TransformParams::default(),
        &opts(),
    );
    assert!(matches!(result, Err(OpError::Kernel(_))));
}
