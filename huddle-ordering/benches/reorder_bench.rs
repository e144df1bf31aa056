//! Benchmarks for the ordering hot paths: pure allocation/rebalance math
//! and a full move transaction against file-backed storage.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huddle_ordering::board::InitBoard;
use huddle_ordering::defaults::GAP;
use huddle_ordering::order::{position_after, rebalance_plan};
use huddle_ordering::task::{AddTask, MoveTask};
use huddle_ordering::{BoardContext, ColumnId, Execute, Task, TaskId};

fn allocator_benches(c: &mut Criterion) {
    let positions: Vec<i64> = (0..1_000).map(|i| i * GAP).collect();

    c.bench_function("position_after_midpoint", |b| {
        b.iter(|| position_after(black_box(&positions), black_box(500)))
    });

    let degraded: Vec<Task> = (0..1_000)
        .map(|i| Task::new(format!("task {i}"), ColumnId::from_string("todo"), i * 7))
        .collect();

    c.bench_function("rebalance_plan_1k", |b| {
        b.iter(|| rebalance_plan(black_box(&degraded)))
    });
}

fn move_task_bench(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let temp = tempfile::TempDir::new().unwrap();
    let ctx = BoardContext::new(temp.path().join(".huddle"));

    let (mover, anchor) = rt.block_on(async {
        InitBoard::new("Bench").execute(&ctx).await.unwrap();
        let mut last = None;
        for i in 0..50 {
            let result = AddTask::new(format!("task {i}")).execute(&ctx).await.unwrap();
            last = Some(TaskId::from_string(result["id"].as_str().unwrap()));
        }
        let anchor = AddTask::new("anchor").execute(&ctx).await.unwrap();
        (
            last.unwrap(),
            TaskId::from_string(anchor["id"].as_str().unwrap()),
        )
    });

    // Steady-state drag: the midpoint between the same neighbors is stable,
    // so every iteration measures the one-row fast path of a full
    // transaction (lock, read, place, gap check, commit).
    c.bench_function("move_task_relative", |b| {
        b.to_async(&rt).iter(|| async {
            MoveTask::insert_before(mover.clone(), anchor.clone())
                .execute(&ctx)
                .await
                .unwrap()
        })
    });
}

criterion_group!(benches, allocator_benches, move_task_bench);
criterion_main!(benches);
