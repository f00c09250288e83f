//! rota command implementations.

use serde::Serialize;

use crate::board::TaskBoard;
use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::remote::HttpTaskStore;
use crate::reorder::{MoveDirection, MoveOutcome};
use crate::task::{Task, TaskForm, TaskId};

pub struct ListOptions {
    pub remote: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: TaskId,
    pub remote: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct AddOptions {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub due_date: Option<String>,
    pub remote: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: TaskId,
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub due_date: Option<String>,
    pub remote: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: TaskId,
    pub remote: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub struct MoveOptions {
    pub id: TaskId,
    pub direction: MoveDirection,
    pub remote: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

fn load_board(remote: Option<String>) -> Result<TaskBoard<HttpTaskStore>> {
    let cwd = std::env::current_dir()?;
    let config = Config::load_from_dir(&cwd);
    let mut remote_config = config.remote;
    if let Some(base_url) = remote {
        remote_config.base_url = base_url;
    }
    let store = HttpTaskStore::new(&remote_config)?;
    Ok(TaskBoard::new(store))
}

fn task_row(task: &Task) -> String {
    format!(
        "{:>3}. {}  (cost {:.2}, due {})",
        task.display_order, task.name, task.cost, task.due_date
    )
}

fn push_task_summary(human: &mut HumanOutput, task: &Task) {
    human.push_summary("ID", task.id.to_string());
    human.push_summary("Name", task.name.clone());
    human.push_summary("Cost", format!("{:.2}", task.cost));
    human.push_summary("Due", task.due_date.to_string());
    human.push_summary("Position", task.display_order.to_string());
}

#[derive(Serialize)]
struct ListOutput {
    total: usize,
    tasks: Vec<Task>,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let mut board = load_board(options.remote)?;
    board.refresh()?;

    let tasks = board.collection().tasks().to_vec();
    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        human.push_detail(task_row(task));
    }

    let output = ListOutput {
        total: tasks.len(),
        tasks,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let mut board = load_board(options.remote)?;
    board.refresh()?;
    let task = board.find(options.id)?.clone();

    let mut human = HumanOutput::new("Task");
    push_task_summary(&mut human, &task);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "show",
        &task,
        Some(&human),
    )
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut board = load_board(options.remote)?;
    board.refresh()?;

    let form = TaskForm {
        name: options.name.unwrap_or_default(),
        cost: options.cost,
        due_date: options.due_date,
    };
    let created = board.create(form)?;

    let mut human = HumanOutput::new("Task created");
    push_task_summary(&mut human, &created);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &created,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut board = load_board(options.remote)?;
    board.refresh()?;
    let existing = board.find(options.id)?.clone();

    // Flags not given keep the task's current values.
    let mut form = TaskForm::from_task(&existing);
    if let Some(name) = options.name {
        form.name = name;
    }
    if let Some(cost) = options.cost {
        form.cost = Some(cost);
    }
    if let Some(due_date) = options.due_date {
        form.due_date = Some(due_date);
    }

    let updated = board.edit(options.id, form)?;

    let mut human = HumanOutput::new("Task updated");
    push_task_summary(&mut human, &updated);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &updated,
        Some(&human),
    )
}

#[derive(Serialize)]
struct DeleteOutput {
    id: TaskId,
    remaining: usize,
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let mut board = load_board(options.remote)?;
    board.refresh()?;
    // Surface an unknown id before issuing the remote delete.
    board.find(options.id)?;
    board.delete(options.id)?;

    let output = DeleteOutput {
        id: options.id,
        remaining: board.collection().len(),
    };

    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", options.id.to_string());
    human.push_summary("Remaining", output.remaining.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "delete",
        &output,
        Some(&human),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveOutput {
    id: TaskId,
    direction: &'static str,
    moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_order: Option<u32>,
}

pub fn run_move(options: MoveOptions) -> Result<()> {
    let mut board = load_board(options.remote)?;
    board.refresh()?;

    let outcome = board.move_task(options.id, options.direction)?;
    let moved = outcome == MoveOutcome::Moved;
    let display_order = board
        .collection()
        .get(options.id)
        .map(|task| task.display_order);

    let output = MoveOutput {
        id: options.id,
        direction: options.direction.as_str(),
        moved,
        display_order,
    };

    let mut human = HumanOutput::new(if moved { "Task moved" } else { "Task not moved" });
    human.push_summary("ID", options.id.to_string());
    human.push_summary("Direction", options.direction.as_str());
    if let Some(order) = display_order {
        human.push_summary("Position", order.to_string());
    }
    if !moved {
        let edge = match options.direction {
            MoveDirection::Up => "top",
            MoveDirection::Down => "bottom",
        };
        human.push_warning(format!("task is already at the {edge} of the list"));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "move",
        &output,
        Some(&human),
    )
}
