//! Full CRUD lifecycle test against a live todo server.
//!
//! # Design
//! Starts the server on a random port with uploads in a temp dir, then
//! exercises every core client operation over real HTTP using ureq. Validates
//! that the core's request building and response parsing work end-to-end with
//! the actual server.

use todo_core::{ApiError, HttpMethod, HttpResponse, ImageFile, Subtask, TodoClient, TodoForm};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let content_type = req.header("content-type").unwrap_or_default().to_string();
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type(&content_type)
            .send(&body[..]),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.path)
            .content_type(&content_type)
            .send(&body[..]),
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn subtask(title: &str, completed: bool) -> Subtask {
    Subtask {
        id: None,
        title: title.to_string(),
        completed,
    }
}

#[test]
fn crud_lifecycle() {
    // Step 1: start the server on a random port.
    let uploads = tempfile::tempdir().unwrap();
    let upload_dir = uploads.path().to_path_buf();
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, upload_dir).await
        })
        .unwrap();
    });

    let client = TodoClient::new(&format!("http://{addr}"));

    // Step 2: list — should be empty.
    let req = client.build_list_todos();
    let todos = client.parse_list_todos(execute(req)).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 3: create a todo with one finished subtask and an image.
    let create_form = TodoForm {
        title: Some("Buy milk".to_string()),
        description: Some("from the corner shop".to_string()),
        subtasks: Some(vec![subtask("go", true)]),
        images: vec![ImageFile {
            file_name: "receipt.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![137, 80, 78, 71],
        }],
    };
    let req = client.build_create_todo(&create_form).unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Buy milk");
    assert!(created.completed);
    assert_eq!(created.images.len(), 1);
    assert!(created.images[0].ends_with("_receipt.png"));
    assert_eq!(std::fs::read(&created.images[0]).unwrap(), vec![137, 80, 78, 71]);
    let id = created.id;

    // Step 4: get the created todo.
    let req = client.build_get_todo(id);
    let fetched = client.parse_get_todo(execute(req)).unwrap();
    assert_eq!(fetched, created);

    // Step 5: malformed subtasks are rejected as a bad request.
    let mut req = client.build_create_todo(&TodoForm::default()).unwrap();
    req.body = Some(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"subtasks\"\r\n\r\n[oops\r\n--{b}--\r\n",
            b = todo_core::multipart::BOUNDARY
        )
        .into_bytes(),
    );
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    // Step 6: update with only an open subtask; title stays, image is dropped.
    let update_form = TodoForm {
        subtasks: Some(vec![subtask("go", true), subtask("pay", false)]),
        ..TodoForm::default()
    };
    let req = client.build_update_todo(id, &update_form).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.title, "Buy milk");
    assert_eq!(updated.description, "from the corner shop");
    assert!(updated.images.is_empty());
    assert_eq!(updated.subtasks.len(), 2);
    assert!(!updated.completed);

    // Step 7: list — should have one item.
    let req = client.build_list_todos();
    let todos = client.parse_list_todos(execute(req)).unwrap();
    assert_eq!(todos, vec![updated]);

    // Step 8: delete.
    let req = client.build_delete_todo(id);
    client.parse_delete_todo(execute(req)).unwrap();

    // Step 9: get after delete — should be NotFound.
    let req = client.build_get_todo(id);
    let err = client.parse_get_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: delete again — should be NotFound.
    let req = client.build_delete_todo(id);
    let err = client.parse_delete_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 11: a new todo gets a fresh id.
    let req = client
        .build_create_todo(&TodoForm {
            title: Some("Next".to_string()),
            ..TodoForm::default()
        })
        .unwrap();
    let next = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(next.id, id + 1);
    assert!(!next.completed);
}
