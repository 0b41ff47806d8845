use super::super::cfg::FrontlineCfg;
use super::super::run::Run;
use super::*;
use crate::graph::{GraphCfg, NodeGraph, NodeId, NodeSpec, Side};

fn graph(pts: &[(u32, [f64; 2])]) -> NodeGraph {
    let specs: Vec<NodeSpec> = pts.iter().map(|&(id, p)| NodeSpec::new(id, p, 1)).collect();
    NodeGraph::from_specs(&specs, GraphCfg::default()).unwrap()
}

fn ids(v: &[u32]) -> Vec<NodeId> {
    v.iter().map(|&i| NodeId(i)).collect()
}

/// Seed `run` with a finished hull and nothing left to claim.
fn seeded<'a>(g: &'a NodeGraph, cfg: FrontlineCfg, hull: &[u32]) -> Run<'a> {
    let mut run = Run::new(g, Side(1), cfg, &[]);
    run.push_hull(ids(hull));
    run.todo.clear();
    run
}

/// Positions (in scan order) at which `op` applies.
fn applicable(op: &dyn Rewrite, run: &Run<'_>) -> Vec<usize> {
    (0..run.hulls[0].len())
        .filter(|&i| op.plan(run, &run.hulls[0], i).is_some())
        .collect()
}

const DENT: [(u32, [f64; 2]); 5] = [
    (1, [0.0, 0.0]),
    (2, [16.0, 0.0]),
    (3, [16.0, 16.0]),
    (4, [8.0, 10.0]),
    (5, [0.0, 16.0]),
];

#[test]
fn merge_tri_folds_reflex_vertex() {
    let g = graph(&DENT);
    let run = seeded(&g, FrontlineCfg::default(), &[1, 2, 3, 4, 5]);
    assert_eq!(applicable(&MergeTri, &run), vec![2]);
    let edit = MergeTri.plan(&run, &run.hulls[0], 2).unwrap();
    assert_eq!(edit.hull, ids(&[1, 2, 3, 5]));
    assert_eq!(edit.dropped, ids(&[4]));
    assert_eq!(edit.region, ids(&[3, 4, 5]));

    let mut run = seeded(&g, FrontlineCfg::default(), &[1, 2, 3, 4, 5]);
    run.refine(0);
    assert_eq!(run.hulls[0].nodes(), &ids(&[1, 2, 3, 5])[..]);
    assert!(!run.on_hull.contains(&NodeId(4)));
    assert_eq!(run.rewrites, 1);
}

#[test]
fn merge_tri_never_swallows_towns_or_enemies() {
    // 4 is linked to a far-away enemy: a frontline town.
    let mut specs: Vec<NodeSpec> = DENT.iter().map(|&(id, p)| NodeSpec::new(id, p, 1)).collect();
    specs[3] = NodeSpec::new(4, [8.0, 10.0], 1).linked_to(&[9]);
    specs.push(NodeSpec::new(9, [8.0, 60.0], 2));
    let g = NodeGraph::from_specs(&specs, GraphCfg::default()).unwrap();
    let run = seeded(&g, FrontlineCfg::default(), &[1, 2, 3, 4, 5]);
    assert!(applicable(&MergeTri, &run).is_empty());

    // Enemy inside the dent.
    let mut pts = DENT.to_vec();
    pts.push((9, [8.0, 13.0]));
    let mut specs: Vec<NodeSpec> = pts.iter().map(|&(id, p)| NodeSpec::new(id, p, 1)).collect();
    specs[5].side = Side(2);
    let g = NodeGraph::from_specs(&specs, GraphCfg::default()).unwrap();
    let mut run = seeded(&g, FrontlineCfg::default(), &[1, 2, 3, 4, 5]);
    assert!(applicable(&MergeTri, &run).is_empty());
    run.refine(0);
    assert_eq!(run.hulls[0].len(), 5);
}

const SEVEN: [(u32, [f64; 2]); 7] = [
    (1, [0.0, 0.0]),
    (2, [20.0, 0.0]),
    (3, [30.0, 10.0]),
    (4, [20.0, 20.0]),
    (5, [14.0, 12.0]),
    (6, [6.0, 12.0]),
    (7, [0.0, 20.0]),
];

#[test]
fn merge_folds_concave_sub_arc() {
    let g = graph(&SEVEN);
    let run = seeded(&g, FrontlineCfg::default(), &[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(applicable(&Merge, &run), vec![3]);
    let edit = Merge.plan(&run, &run.hulls[0], 3).unwrap();
    assert_eq!(edit.hull, ids(&[1, 2, 3, 4, 7]));
    assert_eq!(edit.dropped, ids(&[5, 6]));
    assert_eq!(edit.region, ids(&[4, 5, 6, 7]));
}

#[test]
fn merge_quad_is_opt_in() {
    let g = graph(&SEVEN);
    assert!(!MergeQuad.enabled(&FrontlineCfg::default()));
    let cfg = FrontlineCfg {
        merge_quad: true,
        ..FrontlineCfg::default()
    };
    assert!(MergeQuad.enabled(&cfg));
    let run = seeded(&g, cfg, &[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(applicable(&MergeQuad, &run), vec![3]);
    let edit = MergeQuad.plan(&run, &run.hulls[0], 3).unwrap();
    assert_eq!(edit.hull, ids(&[1, 2, 3, 4, 7]));
}

#[test]
fn merge_expand_swaps_vertex_outward() {
    let g = graph(&[
        (1, [0.0, 0.0]),
        (2, [12.0, -2.0]),
        (3, [20.0, 6.0]),
        (4, [14.0, 16.0]),
        (5, [2.0, 14.0]),
        (6, [13.0, -8.0]),
    ]);
    let mut run = Run::new(&g, Side(1), FrontlineCfg::default(), &[]);
    run.push_hull(ids(&[1, 2, 3, 4, 5]));
    assert_eq!(run.todo.iter().copied().collect::<Vec<_>>(), ids(&[6]));
    assert_eq!(applicable(&MergeExpand, &run), vec![0]);

    let edit = MergeExpand.plan(&run, &run.hulls[0], 0).unwrap();
    assert_eq!(edit.hull, ids(&[1, 6, 3, 4, 5]));
    assert_eq!(edit.region, ids(&[1, 2, 3, 6]));
    assert_eq!(run.apply(0, edit), None);
    assert!(run.todo.is_empty());
    assert!(run.on_hull.contains(&NodeId(6)));
    assert!(!run.on_hull.contains(&NodeId(2)));
}

#[test]
fn split_cuts_pocket_into_hole() {
    let mut specs = Vec::new();
    for k in 0..8u32 {
        let t = std::f64::consts::TAU * k as f64 / 8.0;
        specs.push(NodeSpec::new(k + 1, [10.0 * t.cos(), 10.0 * t.sin()], 1));
        let t2 = std::f64::consts::TAU * (k as f64 + 0.5) / 8.0;
        specs.push(NodeSpec::new(k + 9, [20.0 * t2.cos(), 20.0 * t2.sin()], 1));
    }
    specs.push(NodeSpec::new(100, [0.0, 0.0], 2));
    let g = NodeGraph::from_specs(&specs, GraphCfg::default()).unwrap();

    // C-shaped hull wrapped around the enemy; the mouth is between 16→1 and 2→9.
    let c_shape = [1, 7, 5, 3, 2, 9, 10, 11, 12, 13, 14, 15, 16];
    let mut run = seeded(&g, FrontlineCfg::default(), &c_shape);
    assert_eq!(applicable(&Split, &run), vec![12]);

    let edit = Split.plan(&run, &run.hulls[0], 12).unwrap();
    assert_eq!(edit.hull, ids(&[9, 10, 11, 12, 13, 14, 15, 16]));
    assert_eq!(edit.spawned, Some(ids(&[1, 7, 5, 3, 2])));
    assert_eq!(edit.region, ids(&[16, 1, 2, 9]));

    assert_eq!(run.apply(0, edit), Some(1));
    assert!(run.hulls[0].signed_area(&g) > 0.0);
    assert!(run.hulls[1].signed_area(&g) < 0.0);
}

#[test]
fn operators_run_in_priority_order() {
    let names: Vec<&str> = OPERATORS.iter().map(|op| op.name()).collect();
    assert_eq!(
        names,
        vec!["merge-expand", "merge-tri", "merge-quad", "merge", "expand", "split"]
    );
}
