// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_dialogue::{Menu, MenuContext, MenuElement, MenuOption, MenuSettings};
use understory_dialogue_graph::{
    ChildSpec, DirectedGraphUnderlay, GraphBuilder, NodeSpec, OptionSpec, TitleSpec, build_graph,
};

struct Chain {
    context: Arc<MenuContext>,
    graph: Arc<DirectedGraphUnderlay>,
    next: Arc<MenuOption>,
}

/// A straight line of `len` nodes, each with a `next` edge and a few decoys.
fn gen_chain(len: usize, width: usize) -> Chain {
    let context = Arc::new(MenuContext::new());
    let register = |id: String| {
        context
            .options()
            .register(MenuOption::new(id.as_str(), MenuElement::new(id.as_str(), "")).unwrap())
            .unwrap()
    };
    let next = register("next".to_owned());
    let decoys: Vec<_> = (0..width).map(|i| register(format!("decoy{i}"))).collect();

    let graph = Arc::new(DirectedGraphUnderlay::new("chain", MenuElement::new("n0", "")).unwrap());
    let mut prev = graph.start_node();
    for i in 1..len {
        let node = graph.add_node(MenuElement::new(format!("n{i}"), ""));
        for decoy in &decoys {
            prev.add_child(Arc::clone(decoy), None).unwrap();
        }
        prev.add_child(Arc::clone(&next), Some(&node)).unwrap();
        prev = node;
    }
    prev.add_child(Arc::clone(&next), None).unwrap();
    Chain {
        context,
        graph,
        next,
    }
}

/// A description whose `i`-th node links forward to node `i + stride`.
fn gen_description(len: usize, stride: usize) -> (MenuContext, NodeSpec) {
    let context = MenuContext::new();
    for id in ["down", "jump", "stop"] {
        context
            .options()
            .register(MenuOption::new(id, MenuElement::new(id, "")).unwrap())
            .unwrap();
    }
    let mut spec = NodeSpec {
        name: Some(format!("n{}", len - 1)),
        title: TitleSpec {
            name: format!("n{}", len - 1),
            ..TitleSpec::default()
        },
        options: vec![OptionSpec {
            option: "stop".into(),
            child: None,
        }],
    };
    for i in (0..len - 1).rev() {
        spec = NodeSpec {
            name: Some(format!("n{i}")),
            title: TitleSpec {
                name: format!("n{i}"),
                ..TitleSpec::default()
            },
            options: vec![
                OptionSpec {
                    option: "jump".into(),
                    child: Some(ChildSpec::Goto(format!("n{}", (i + stride) % len))),
                },
                OptionSpec {
                    option: "down".into(),
                    child: Some(ChildSpec::Node(Box::new(spec))),
                },
            ],
        };
    }
    (context, spec)
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    for &(len, width) in &[(64usize, 2usize), (256, 2), (256, 16)] {
        let chain = gen_chain(len, width);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(format!("walk_len{len}_width{width}"), |b| {
            b.iter_batched(
                || Menu::new(&chain.context, Arc::clone(&chain.graph), None).unwrap(),
                |mut menu| {
                    for _ in 0..len {
                        black_box(menu.select(&chain.next));
                    }
                    menu
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("walk_by_id_len{len}_width{width}"), |b| {
            b.iter_batched(
                || Menu::new(&chain.context, Arc::clone(&chain.graph), None).unwrap(),
                |mut menu| {
                    for _ in 0..len {
                        black_box(menu.select_id("next"));
                    }
                    menu
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_go_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("go_back");
    let len = 256;
    let chain = gen_chain(len, 4);
    for &capacity in &[16usize, 50, 256] {
        group.throughput(Throughput::Elements(capacity as u64));
        group.bench_function(format!("unwind_capacity{capacity}"), |b| {
            b.iter_batched(
                || {
                    let settings = MenuSettings {
                        history_capacity: capacity,
                    };
                    let mut menu = Menu::with_settings(
                        &chain.context,
                        Arc::clone(&chain.graph),
                        None,
                        settings,
                    )
                    .unwrap();
                    for _ in 0..len - 1 {
                        menu.select(&chain.next);
                    }
                    menu
                },
                |mut menu| {
                    while menu.go_back() {}
                    black_box(menu.history_len());
                    menu
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &len in &[64usize, 512] {
        group.throughput(Throughput::Elements(len as u64));
        let (context, spec) = gen_description(len, 7);
        group.bench_function(format!("description_len{len}"), |b| {
            b.iter(|| black_box(build_graph(context.options(), "bench", &spec).unwrap()))
        });

        let jump = Arc::new(MenuOption::new("jump", MenuElement::new("jump", "")).unwrap());
        group.bench_function(format!("builder_references_len{len}"), |b| {
            b.iter(|| {
                let mut builder =
                    GraphBuilder::new("bench", MenuElement::new("n0", ""), Some("n0")).unwrap();
                let mut prev = builder.start();
                for i in 1..len {
                    // Each node points one step ahead, at a name not declared yet.
                    builder
                        .add_reference(&prev, Arc::clone(&jump), format!("n{i}"))
                        .unwrap();
                    let name = format!("n{i}");
                    prev = builder
                        .add_node(MenuElement::new(name.as_str(), ""), Some(&name))
                        .unwrap();
                }
                black_box(builder.finish().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select, bench_go_back, bench_build);
criterion_main!(benches);
