//! Integration tests for project creation through the library API.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;
use wanpc::cli::commands::create::CreateCommand;
use wanpc::cli::{Command, CreateArgs};
use wanpc::config::{ConfigDocument, ConfigStore};
use wanpc::template::{collect_context, Context, RenderOutput, TemplateEngine, VariableSchema};
use wanpc::ui::MockUI;
use wanpc::Result;

const DESCRIPTOR: &str = r#"{
    "project_name": "My Project",
    "project_slug": "{{ cookiecutter.project_name|lower|replace(' ', '_') }}",
    "author": "John Doe",
    "email": "",
    "license": ["MIT", "Apache", "GPL"],
    "_copy_without_render": ["*.html"]
}"#;

#[derive(Clone, Default)]
struct RecordingEngine {
    contexts: Rc<RefCell<Vec<Context>>>,
}

impl TemplateEngine for RecordingEngine {
    fn render(&self, _template: &Path, _output: &Path, context: &Context) -> Result<RenderOutput> {
        self.contexts.borrow_mut().push(context.clone());
        Ok(RenderOutput::default())
    }
}

fn setup(global: &[(&str, &str)]) -> (TempDir, ConfigStore, PathBuf) {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("tpl");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("cookiecutter.json"), DESCRIPTOR).unwrap();

    let mut config = ConfigDocument::default();
    config
        .add_template("python-pkg", "tpl", None, temp.path())
        .unwrap();
    for (k, v) in global {
        config.set_global_default(k, v).unwrap();
    }
    let store = ConfigStore::new(temp.path().join("config.toml"));
    store.save(&config).unwrap();
    (temp, store, dir)
}

fn create(store: &ConfigStore, cwd: &Path, args: CreateArgs, ui: &mut MockUI) -> Context {
    let engine = RecordingEngine::default();
    CreateCommand::new(store.clone(), cwd, args, Box::new(engine.clone()))
        .execute(ui)
        .unwrap();
    let contexts = engine.contexts.borrow();
    contexts[0].clone()
}

#[test]
fn command_line_override_beats_global_default() {
    let (temp, store, _) = setup(&[("license", "MIT")]);
    let mut args = CreateArgs::new("python-pkg");
    args.overrides = vec!["--license".into(), "GPL".into()];
    let mut ui = MockUI::new();

    let context = create(&store, temp.path(), args, &mut ui);

    assert_eq!(context["license"], "GPL");
}

#[test]
fn no_defaults_falls_back_to_schema_default() {
    let (temp, store, _) = setup(&[("author", "Global")]);
    let mut args = CreateArgs::new("python-pkg");
    args.no_defaults = true;
    let mut ui = MockUI::new();

    let context = create(&store, temp.path(), args, &mut ui);

    assert_eq!(context["author"], "John Doe");
}

#[test]
fn prompts_only_for_unresolved_user_variables() {
    let (temp, store, _) = setup(&[("author", "Jane")]);
    let mut ui = MockUI::new();
    ui.set_prompt_response("project_name", "Rocket");
    ui.set_prompt_response("email", "jane@example.com");

    let context = create(&store, temp.path(), CreateArgs::new("python-pkg"), &mut ui);

    assert_eq!(ui.prompts_shown(), &["project_name", "email", "license"]);
    assert_eq!(context["project_name"], "Rocket");
    assert_eq!(context["author"], "Jane");
    assert_eq!(context["email"], "jane@example.com");
    assert_eq!(context["license"], "MIT");
    assert!(!context.contains_key("project_slug"));
    assert!(!context.contains_key("_copy_without_render"));
}

#[test]
fn collect_context_directly_from_schema() {
    let (_temp, _store, dir) = setup(&[]);
    let schema = VariableSchema::load(&dir).unwrap();
    let mut ui = MockUI::new();
    ui.set_prompt_response("license", "Apache");

    let context = collect_context(&schema, &Context::new(), None, &mut ui).unwrap();

    assert_eq!(context["license"], "Apache");
    assert_eq!(context["email"], "");
}
