use crate::dom::escape;
use crate::models::{Task, TaskStatus};
use crate::routes::RouteTable;

/// Page that hosts the application root the router renders into.
pub fn render_shell(routes: &RouteTable, api_url: &str) -> String {
    let nav = routes
        .routes()
        .iter()
        .map(|route| format!(r#"<a href="{}">{}</a>"#, route.hash(), route.name))
        .collect::<Vec<_>>()
        .join("\n      ");

    SHELL_HTML
        .replace("{{NAV}}", &nav)
        .replace("{{API_URL}}", &escape(api_url))
        .replace("{{DEFAULT_ROUTE}}", routes.default_route().name)
}

/// Markup of the view fragment called `name`.
pub fn fragment(name: &str) -> Option<&'static str> {
    match name {
        "login" => Some(LOGIN_HTML),
        "register" => Some(REGISTER_HTML),
        "recover" => Some(RECOVER_HTML),
        "dashboard" => Some(DASHBOARD_HTML),
        "home" => Some(HOME_HTML),
        "board" => Some(BOARD_HTML),
        _ => None,
    }
}

/// One task entry for a board list. `detailed` adds detail, schedule and
/// status underneath the title.
pub fn task_item(task: &Task, detailed: bool) -> String {
    let completed = task.status == TaskStatus::Completed;
    let mut meta = String::new();
    if detailed {
        let when = [task.date.map(|d| d.to_string()), task.time.map(|t| t.format("%H:%M").to_string())]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let parts = [task.detail.clone(), when, status_label(task.status).to_string()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ");
        meta = format!(r#"<small class="meta">{}</small>"#, escape(&parts));
    }

    format!(
        r#"<li class="todo{}">
  <label>
    <input type="checkbox" class="check"{}>
    <span class="title">{}</span>
  </label>
  {meta}
  <button class="link remove" type="button">Remove</button>
</li>"#,
        if completed { " completed" } else { "" },
        if completed { " checked" } else { "" },
        escape(&task.title),
    )
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in progress",
        TaskStatus::Completed => "completed",
    }
}

const SHELL_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="api-url" content="{{API_URL}}" />
  <title>Taskboard</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --card: rgba(255, 255, 255, 0.86);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
    }

    #app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 20px;
      padding: 28px;
    }

    .todo.completed .title {
      text-decoration: line-through;
      opacity: 0.6;
    }

    .route-error {
      color: #b3261e;
    }
  </style>
</head>
<body data-default-route="{{DEFAULT_ROUTE}}">
  <nav>
      {{NAV}}
  </nav>
  <main id="app"></main>
</body>
</html>
"#;

const LOGIN_HTML: &str = r##"<section class="view">
  <h1>Log in</h1>
  <form id="loginForm">
    <input id="email" type="email" placeholder="Email" />
    <input id="password" type="password" placeholder="Password" />
    <button type="submit">Log in</button>
  </form>
  <p id="loginMsg" class="msg"></p>
  <p><a href="#/register">Create an account</a> · <a href="#/recover">Forgot your password?</a></p>
</section>
"##;

const REGISTER_HTML: &str = r##"<section class="view">
  <h1>Create an account</h1>
  <form id="registerForm">
    <input id="firstName" type="text" placeholder="First name" />
    <input id="lastName" type="text" placeholder="Last name" />
    <input id="age" type="number" min="0" placeholder="Age" />
    <input id="email" type="email" placeholder="Email" />
    <input id="password" type="password" placeholder="Password" />
    <button type="submit">Sign up</button>
  </form>
  <p id="registerMsg" class="msg"></p>
  <p><a href="#/login">Already registered? Log in</a></p>
</section>
"##;

const RECOVER_HTML: &str = r##"<section class="view">
  <h1>Recover your password</h1>
  <form id="recoverForm">
    <input id="email" type="email" placeholder="Email" />
    <button type="submit">Send instructions</button>
  </form>
  <p id="recoverMsg" class="msg"></p>
  <p><a href="#/login">Back to log in</a></p>
</section>
"##;

const DASHBOARD_HTML: &str = r#"<section class="view">
  <header>
    <h1>Your tasks</h1>
    <button id="logoutBtn" type="button" class="link">Log out</button>
  </header>
  <form id="taskForm">
    <input id="taskTitle" type="text" placeholder="Title" />
    <textarea id="taskDetail" placeholder="Details"></textarea>
    <input id="taskDate" type="date" />
    <input id="taskTime" type="time" />
    <select id="taskStatus">
      <option value="pending">Pending</option>
      <option value="in_progress">In progress</option>
      <option value="completed">Completed</option>
    </select>
    <button type="submit">Add task</button>
  </form>
  <p id="taskMsg" class="msg"></p>
  <ul id="taskList" class="todos"></ul>
</section>
"#;

const HOME_HTML: &str = r#"<section class="view">
  <h1>Welcome</h1>
  <form id="registerForm">
    <input id="username" type="text" placeholder="Username" />
    <input id="password" type="password" placeholder="Password" />
    <button type="submit">Register</button>
  </form>
  <p id="registerMsg" class="msg"></p>
</section>
"#;

const BOARD_HTML: &str = r#"<section class="view">
  <h1>Board</h1>
  <form id="todoForm">
    <input id="newTodo" type="text" placeholder="What needs doing?" />
    <button type="submit">Add</button>
  </form>
  <ul id="todoList" class="todos"></ul>
</section>
"#;

pub const ROUTE_ERROR_HTML: &str = r#"<p class="route-error">Error loading the view.</p>"#;
