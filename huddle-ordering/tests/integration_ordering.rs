//! End-to-end ordering scenarios: creation ladder, midpoint drags,
//! rebalance trigger, batch reorder, cross-column moves.

use huddle_ordering::board::InitBoard;
use huddle_ordering::defaults::GAP;
use huddle_ordering::task::{AddTask, ListColumnTasks, MoveTask, ReorderColumn, ReorderEntry};
use huddle_ordering::{BoardContext, ColumnId, Execute, OrderingError, TaskId};
use tempfile::TempDir;

async fn setup() -> (TempDir, BoardContext) {
    let temp = TempDir::new().unwrap();
    let ctx = BoardContext::new(temp.path().join(".huddle"));

    InitBoard::new("Integration").execute(&ctx).await.unwrap();

    (temp, ctx)
}

async fn add(ctx: &BoardContext, title: &str) -> TaskId {
    let result = AddTask::new(title).execute(ctx).await.unwrap();
    TaskId::from_string(result["id"].as_str().unwrap())
}

async fn column_positions(ctx: &BoardContext, column: &str) -> Vec<(TaskId, i64)> {
    ctx.column_tasks(&ColumnId::from_string(column))
        .await
        .unwrap()
        .iter()
        .map(|t| (t.id.clone(), t.position))
        .collect()
}

#[tokio::test]
async fn creation_ladder_spaces_tasks_by_gap() {
    let (_temp, ctx) = setup().await;

    add(&ctx, "One").await;
    add(&ctx, "Two").await;
    add(&ctx, "Three").await;

    let positions: Vec<i64> = column_positions(&ctx, "todo")
        .await
        .iter()
        .map(|(_, p)| *p)
        .collect();
    assert_eq!(positions, vec![0, GAP, 2 * GAP]);
}

#[tokio::test]
async fn successive_midpoint_inserts_halve_the_gap() {
    let (_temp, ctx) = setup().await;

    let first = add(&ctx, "First").await;
    let _second = add(&ctx, "Second").await;
    let third = add(&ctx, "Third").await;
    let fourth = add(&ctx, "Fourth").await;

    // Successor of "First" is at 1,000,000
    let moved = MoveTask::insert_after(third, first.clone())
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(moved["position"], 500_000);

    // Nearest successor is now at 500,000
    let moved = MoveTask::insert_after(fourth, first)
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(moved["position"], 250_000);
}

#[tokio::test]
async fn repeated_halving_triggers_column_rebalance() {
    let (_temp, ctx) = setup().await;

    let first = add(&ctx, "Head").await;
    let second = add(&ctx, "Tail").await;

    // Display order we expect the engine to maintain throughout
    let mut expected: Vec<TaskId> = vec![first.clone(), second];

    let mut rebalanced_at = None;
    for round in 0..20 {
        let task = add(&ctx, &format!("Wedge {round}")).await;
        let moved = MoveTask::insert_after(task.clone(), first.clone())
            .execute(&ctx)
            .await
            .unwrap();
        expected.insert(1, task);

        // Positions stay strictly increasing at every step; the engine
        // never emits a duplicate sort key.
        let snapshot = column_positions(&ctx, "todo").await;
        assert!(
            snapshot.windows(2).all(|w| w[0].1 < w[1].1),
            "duplicate or inverted positions in round {round}: {snapshot:?}"
        );

        if moved["rebalanced"] == true {
            rebalanced_at = Some(round);
            break;
        }
    }

    // Halving a 1,000,000 gap against threshold 100 exhausts in ~14 rounds
    let round = rebalanced_at.expect("gap degradation must trigger a rebalance");
    assert!((10..=15).contains(&round), "rebalanced at round {round}");

    // The rebalance reset the column to uniform spacing, preserving the
    // relative order that existed before it ran.
    let snapshot = column_positions(&ctx, "todo").await;
    let ids: Vec<TaskId> = snapshot.iter().map(|(id, _)| id.clone()).collect();
    assert_eq!(ids, expected);
    let positions: Vec<i64> = snapshot.iter().map(|(_, p)| *p).collect();
    let uniform: Vec<i64> = (0..expected.len() as i64).map(|i| i * GAP).collect();
    assert_eq!(positions, uniform);
}

#[tokio::test]
async fn batch_reorder_reverses_column() {
    let (_temp, ctx) = setup().await;

    let a = add(&ctx, "A").await;
    let b = add(&ctx, "B").await;
    let c = add(&ctx, "C").await;

    // Hand each task another one's position, reversing the column
    let result = ReorderColumn::new(
        "todo",
        vec![
            ReorderEntry { task: a.clone(), position: 2 * GAP },
            ReorderEntry { task: b.clone(), position: GAP },
            ReorderEntry { task: c.clone(), position: 0 },
        ],
    )
    .execute(&ctx)
    .await
    .unwrap();

    assert_eq!(result["success"], true);
    // The reversed spacing is still uniform, so no rebalance was needed
    assert_eq!(result["rebalanced"], false);

    let ids: Vec<TaskId> = column_positions(&ctx, "todo")
        .await
        .iter()
        .map(|(id, _)| id.clone())
        .collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[tokio::test]
async fn batch_reorder_is_all_or_nothing() {
    let (_temp, ctx) = setup().await;

    let a = add(&ctx, "A").await;
    let b = add(&ctx, "B").await;

    let before = column_positions(&ctx, "todo").await;

    let result = ReorderColumn::new(
        "todo",
        vec![
            ReorderEntry { task: b.clone(), position: 0 },
            ReorderEntry { task: a.clone(), position: GAP },
            ReorderEntry { task: TaskId::from_string("01H455VB4PMISSING0000000"), position: 2 * GAP },
        ],
    )
    .execute(&ctx)
    .await;

    assert!(matches!(result, Err(OrderingError::TaskNotFound { .. })));
    assert_eq!(column_positions(&ctx, "todo").await, before);
}

#[tokio::test]
async fn cross_column_move_checks_only_the_destination() {
    let (_temp, ctx) = setup().await;

    // Source column with three tasks
    let keep_a = add(&ctx, "Keep A").await;
    let moving = add(&ctx, "Moving").await;
    let keep_b = add(&ctx, "Keep B").await;

    // Destination column with tight (but acceptable) spacing
    let anchor = add(&ctx, "Anchor").await;
    MoveTask::to_column(anchor.clone(), "doing")
        .execute(&ctx)
        .await
        .unwrap();
    let neighbor = add(&ctx, "Neighbor").await;
    MoveTask::to_column(neighbor.clone(), "doing")
        .execute(&ctx)
        .await
        .unwrap();
    ReorderColumn::new(
        "doing",
        vec![
            ReorderEntry { task: anchor.clone(), position: 0 },
            ReorderEntry { task: neighbor.clone(), position: 150 },
        ],
    )
    .execute(&ctx)
    .await
    .unwrap();

    let source_before = column_positions(&ctx, "todo").await;

    // Dropping between 0 and 150 lands on 75 and degrades the destination,
    // so the move rebalances it - in the same transaction.
    let moved = MoveTask::insert_after(moving.clone(), anchor.clone())
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(moved["column"], "doing");
    assert_eq!(moved["rebalanced"], true);

    let doing = column_positions(&ctx, "doing").await;
    let ids: Vec<&TaskId> = doing.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![&anchor, &moving, &neighbor]);
    let positions: Vec<i64> = doing.iter().map(|(_, p)| *p).collect();
    assert_eq!(positions, vec![0, GAP, 2 * GAP]);

    // The source column lost the moved task and is otherwise untouched
    let source_after = column_positions(&ctx, "todo").await;
    let expected: Vec<(TaskId, i64)> = source_before
        .into_iter()
        .filter(|(id, _)| *id != moving)
        .collect();
    assert_eq!(source_after, expected);
    assert_eq!(
        source_after.iter().map(|(id, _)| id).collect::<Vec<_>>(),
        vec![&keep_a, &keep_b]
    );
}

#[tokio::test]
async fn rebalance_is_idempotent_end_to_end() {
    let (_temp, ctx) = setup().await;

    let a = add(&ctx, "A").await;
    let b = add(&ctx, "B").await;

    // Degrade the column so the batch rebalances it
    let result = ReorderColumn::new(
        "todo",
        vec![
            ReorderEntry { task: a.clone(), position: 0 },
            ReorderEntry { task: b.clone(), position: 10 },
        ],
    )
    .execute(&ctx)
    .await
    .unwrap();
    assert_eq!(result["rebalanced"], true);

    let first_pass = column_positions(&ctx, "todo").await;
    assert_eq!(
        first_pass.iter().map(|(_, p)| *p).collect::<Vec<i64>>(),
        vec![0, GAP]
    );

    // Writing the already-uniform positions back changes nothing
    let entries: Vec<ReorderEntry> = first_pass
        .iter()
        .map(|(id, p)| ReorderEntry { task: id.clone(), position: *p })
        .collect();
    let result = ReorderColumn::new("todo", entries).execute(&ctx).await.unwrap();
    assert_eq!(result["rebalanced"], false);
    assert_eq!(column_positions(&ctx, "todo").await, first_pass);
}

#[tokio::test]
async fn list_is_the_authoritative_refetch_surface() {
    let (_temp, ctx) = setup().await;

    let a = add(&ctx, "A").await;
    let b = add(&ctx, "B").await;

    // Force a rebalance so cached positions go stale
    let result = ReorderColumn::new(
        "todo",
        vec![
            ReorderEntry { task: b.clone(), position: 0 },
            ReorderEntry { task: a.clone(), position: 1 },
        ],
    )
    .execute(&ctx)
    .await
    .unwrap();
    assert_eq!(result["rebalanced"], true);

    let listed = ListColumnTasks::new("todo").execute(&ctx).await.unwrap();
    assert_eq!(listed["count"], 2);
    assert_eq!(listed["tasks"][0]["id"], b.as_str());
    assert_eq!(listed["tasks"][1]["id"], a.as_str());
    assert_eq!(listed["tasks"][0]["position"], 0);
    assert_eq!(listed["tasks"][1]["position"], GAP);
}
