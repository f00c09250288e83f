#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::NaiveDate;
use serde::Deserialize;

use rota::error::{Error, Result};
use rota::remote::RemoteTaskStore;
use rota::task::{Task, TaskFields, TaskId};

pub fn task(id: TaskId, name: &str, order: u32) -> Task {
    Task {
        id,
        name: name.to_string(),
        cost: 100.0,
        due_date: "2025-01-05".parse().expect("date"),
        display_order: order,
    }
}

/// In-memory [`RemoteTaskStore`] double with the remote's semantics: ids
/// assigned on create, new tasks appended at display order N+1, duplicate
/// names rejected. Failure flags make individual calls fail with a
/// transport error.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub tasks: RefCell<Vec<Task>>,
    pub next_id: Cell<TaskId>,
    pub fail_fetch: Cell<bool>,
    pub fail_reorder: Cell<bool>,
    pub fail_writes: Cell<bool>,
    pub reorder_calls: Cell<usize>,
}

impl MemoryStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        Self {
            tasks: RefCell::new(tasks),
            next_id: Cell::new(next_id),
            ..Self::default()
        }
    }

    fn transport_failure() -> Error {
        Error::RemoteStatus { status: 500 }
    }
}

impl RemoteTaskStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Task>> {
        if self.fail_fetch.get() {
            return Err(Self::transport_failure());
        }
        Ok(self.tasks.borrow().clone())
    }

    fn create(&self, fields: &TaskFields) -> Result<Task> {
        if self.fail_writes.get() {
            return Err(Self::transport_failure());
        }
        let mut tasks = self.tasks.borrow_mut();
        if tasks.iter().any(|task| task.name == fields.name) {
            return Err(Error::DuplicateName(fields.name.clone()));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let task = Task {
            id,
            name: fields.name.clone(),
            cost: fields.cost,
            due_date: fields.due_date,
            display_order: tasks.len() as u32 + 1,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    fn update(&self, id: TaskId, fields: &TaskFields) -> Result<Task> {
        if self.fail_writes.get() {
            return Err(Self::transport_failure());
        }
        let mut tasks = self.tasks.borrow_mut();
        if tasks
            .iter()
            .any(|task| task.name == fields.name && task.id != id)
        {
            return Err(Error::DuplicateName(fields.name.clone()));
        }
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.name = fields.name.clone();
        task.cost = fields.cost;
        task.due_date = fields.due_date;
        Ok(task.clone())
    }

    fn delete(&self, id: TaskId) -> Result<()> {
        if self.fail_writes.get() {
            return Err(Self::transport_failure());
        }
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(Error::TaskNotFound(id));
        }
        Ok(())
    }

    fn reorder(&self, reordered: &[Task]) -> Result<()> {
        self.reorder_calls.set(self.reorder_calls.get() + 1);
        if self.fail_reorder.get() {
            return Err(Error::RemoteStatus { status: 502 });
        }
        *self.tasks.borrow_mut() = reordered.to_vec();
        Ok(())
    }
}

/// A minimal task API over a local TCP listener, for driving the compiled
/// binary end to end. Speaks just enough HTTP/1.1 for the client: one
/// request per connection, JSON bodies, `Connection: close`.
pub struct StubApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

struct ApiState {
    tasks: Vec<Task>,
    next_id: TaskId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskPayload {
    name: String,
    cost: f64,
    due_date: NaiveDate,
}

impl StubApi {
    pub fn start(initial: Vec<Task>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub api");
        let addr = listener.local_addr().expect("local addr");
        let next_id = initial.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        let state = Arc::new(Mutex::new(ApiState {
            tasks: initial,
            next_id,
        }));

        let handler_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let _ = handle_connection(stream, &handler_state);
            }
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().expect("api state").tasks.clone()
    }
}

fn handle_connection(mut stream: TcpStream, state: &Arc<Mutex<ApiState>>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line
            .to_ascii_lowercase()
            .strip_prefix("content-length:")
            .map(str::trim)
        {
            content_length = value.parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let (status, response_body) = route(&method, &path, &body, state);
    let body_text = response_body.unwrap_or_default();
    write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body_text}",
        body_text.len()
    )?;
    stream.flush()?;
    Ok(())
}

fn route(
    method: &str,
    path: &str,
    body: &[u8],
    state: &Arc<Mutex<ApiState>>,
) -> (&'static str, Option<String>) {
    let mut state = state.lock().expect("api state");

    match (method, path) {
        ("GET", "/api/tasks") => {
            let body = serde_json::to_string(&state.tasks).expect("serialize tasks");
            ("200 OK", Some(body))
        }
        ("POST", "/api/tasks") => {
            let Ok(payload) = serde_json::from_slice::<TaskPayload>(body) else {
                return ("400 Bad Request", None);
            };
            if state.tasks.iter().any(|task| task.name == payload.name) {
                return ("409 Conflict", None);
            }
            let task = Task {
                id: state.next_id,
                name: payload.name,
                cost: payload.cost,
                due_date: payload.due_date,
                display_order: state.tasks.len() as u32 + 1,
            };
            state.next_id += 1;
            state.tasks.push(task.clone());
            let body = serde_json::to_string(&task).expect("serialize task");
            ("200 OK", Some(body))
        }
        ("PUT", "/api/tasks/order") => {
            let Ok(tasks) = serde_json::from_slice::<Vec<Task>>(body) else {
                return ("400 Bad Request", None);
            };
            state.tasks = tasks;
            ("200 OK", None)
        }
        ("PUT", _) if path.starts_with("/api/tasks/") => {
            let Some(id) = parse_id(path) else {
                return ("400 Bad Request", None);
            };
            let Ok(payload) = serde_json::from_slice::<TaskPayload>(body) else {
                return ("400 Bad Request", None);
            };
            if state
                .tasks
                .iter()
                .any(|task| task.name == payload.name && task.id != id)
            {
                return ("409 Conflict", None);
            }
            let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) else {
                return ("404 Not Found", None);
            };
            task.name = payload.name;
            task.cost = payload.cost;
            task.due_date = payload.due_date;
            let body = serde_json::to_string(task).expect("serialize task");
            ("200 OK", Some(body))
        }
        ("DELETE", _) if path.starts_with("/api/tasks/") => {
            let Some(id) = parse_id(path) else {
                return ("400 Bad Request", None);
            };
            let before = state.tasks.len();
            state.tasks.retain(|task| task.id != id);
            if state.tasks.len() == before {
                return ("404 Not Found", None);
            }
            ("200 OK", None)
        }
        _ => ("404 Not Found", None),
    }
}

fn parse_id(path: &str) -> Option<TaskId> {
    path.strip_prefix("/api/tasks/")?.parse().ok()
}
