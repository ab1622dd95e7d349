use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VERANDA: &str = r#"{
    "slug": "veranda",
    "name": "Veranda",
    "description": "Aluminium veranda with glass roof",
    "steps": [
        {"order": 1, "fieldName": "color", "inputType": "radio", "required": true,
         "title": {"en": "Colour", "nl": "Kleur"},
         "options": [
            {"value": "anthracite", "label": {"en": "Anthracite"}},
            {"value": "black", "label": {"en": "Black", "nl": "Zwart"}, "displayOrder": 1},
            {"value": "white", "label": {"en": "White"}, "displayOrder": 2}
         ]},
        {"order": 2, "fieldName": "width", "inputType": "number", "required": true,
         "title": {"en": "Width (cm)"}, "minValue": 100, "maxValue": 1000},
        {"order": 3, "fieldName": "lighting", "inputType": "radio",
         "title": {"en": "Lighting"},
         "options": [
            {"value": "none", "label": {"en": "No lighting"}},
            {"value": "led", "label": {"en": "LED strip"}, "displayOrder": 1},
            {"value": "spots", "label": {"en": "Spots"}, "displayOrder": 2}
         ]}
    ]
}"#;

const ANSWERS: &str = r#"{
    "answers": {"color": "black", "width": 500, "_more_customization": true, "lighting": "led"},
    "contact": {"name": "Ann", "email": "ann@example.com", "phone": "0612345678"},
    "appointment": {"wanted": true, "serviceType": "measurement", "date": "2026-11-03", "time": "10:30"}
}"#;

/// Temporary directory with a database path and the fixture files
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        fs::write(dir.path().join("veranda.json"), VERANDA).unwrap();
        fs::write(dir.path().join("answers.json"), ANSWERS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    /// Command with --no-color and this environment's database
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("configurator").expect("Failed to find configurator binary");
        cmd.env_remove("CONFIGURATOR_WEBHOOK_URL")
            .env_remove("CONFIGURATOR_LOCALE")
            .arg("--no-color")
            .arg("--database-file")
            .arg(self.path("cli_test.db"));
        cmd
    }

    fn import_veranda(&self) {
        self.cmd()
            .args(["schema", "import"])
            .arg(self.path("veranda.json"))
            .assert()
            .success();
    }
}

#[test]
fn test_cli_list_empty() {
    let env = TestEnv::new();

    env.cmd()
        .args(["schema", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No configurators found."));
}

#[test]
fn test_cli_default_command_lists_configurators() {
    let env = TestEnv::new();
    env.import_veranda();

    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("## Veranda (ID: 1, slug: `veranda`)"))
        .stdout(predicate::str::contains("- **Steps**: 3"));
}

#[test]
fn test_cli_import_and_show() {
    let env = TestEnv::new();

    env.cmd()
        .args(["schema", "import"])
        .arg(env.path("veranda.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported configurator 'veranda' with ID: 1 (3 steps)",
        ));

    env.cmd()
        .args(["schema", "show", "veranda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Veranda (ID: 1)"))
        .stdout(predicate::str::contains("Aluminium veranda with glass roof"))
        .stdout(predicate::str::contains("- `black` Black"));
}

#[test]
fn test_cli_show_uses_locale() {
    let env = TestEnv::new();
    env.import_veranda();

    env.cmd()
        .args(["--locale", "nl", "schema", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kleur"))
        .stdout(predicate::str::contains("- `black` Zwart"))
        // no Dutch label, falls back to English
        .stdout(predicate::str::contains("- `white` White"));
}

#[test]
fn test_cli_duplicate_import_needs_replace() {
    let env = TestEnv::new();
    env.import_veranda();

    env.cmd()
        .args(["schema", "import"])
        .arg(env.path("veranda.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to import configurator"));

    env.cmd()
        .args(["schema", "import", "--replace"])
        .arg(env.path("veranda.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced configurator 'veranda' with ID: 1"));
}

#[test]
fn test_cli_import_rejects_invalid_definition() {
    let env = TestEnv::new();
    let broken = env.write(
        "broken.json",
        r#"{"slug": "broken", "name": "Broken", "steps": [
            {"order": 1, "fieldName": "color", "inputType": "radio", "options": []}
        ]}"#,
    );

    env.cmd()
        .args(["schema", "import", &broken])
        .assert()
        .failure();

    let not_json = env.write("not-json.json", "steps: []");
    env.cmd()
        .args(["schema", "import", &not_json])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid definition file"));
}

#[test]
fn test_cli_json_schema() {
    let env = TestEnv::new();

    env.cmd()
        .args(["schema", "json-schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"steps\""))
        .stdout(predicate::str::contains("\"slug\""));
}

#[test]
fn test_cli_delete_keeps_submissions() {
    let env = TestEnv::new();
    env.import_veranda();
    env.cmd()
        .args(["wizard", "veranda", "--answers"])
        .arg(env.path("answers.json"))
        .assert()
        .success();

    env.cmd()
        .args(["schema", "delete", "veranda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted configurator 'Veranda' (ID: 1)"));

    env.cmd()
        .args(["schema", "show", "veranda"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    env.cmd()
        .args(["submission", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Configurator: 1 (deleted)"))
        .stdout(predicate::str::contains("- **color**: black"));
}

#[test]
fn test_cli_scripted_wizard_and_back_office() {
    let env = TestEnv::new();
    env.import_veranda();

    env.cmd()
        .args(["wizard", "veranda", "--answers"])
        .arg(env.path("answers.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# Thank you, Ann!"))
        .stdout(predicate::str::contains("reference **1**"));

    env.cmd()
        .args(["submission", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Status: new"))
        .stdout(predicate::str::contains("- **Colour**: Black"))
        .stdout(predicate::str::contains("- **Width (cm)**: 500"))
        .stdout(predicate::str::contains("- **Lighting**: LED strip"))
        .stdout(predicate::str::contains("- Date: 2026-11-03"));

    env.cmd()
        .args(["submission", "status", "1", "quoted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submission 1 is now quoted"));

    env.cmd()
        .args(["submission", "list", "--status", "quoted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Submission 1 (quoted)"));

    env.cmd()
        .args(["submission", "list", "--status", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions found."));
}

#[test]
fn test_cli_scripted_wizard_stops_on_invalid_answer() {
    let env = TestEnv::new();
    env.import_veranda();
    let answers = env.write(
        "too-narrow.json",
        r#"{
            "answers": {"color": "black", "width": 20},
            "contact": {"name": "Ann", "email": "ann@example.com", "phone": "0612345678"}
        }"#,
    );

    env.cmd()
        .args(["wizard", "veranda", "--answers", &answers])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not complete the wizard"));

    env.cmd()
        .args(["submission", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No submissions found."));
}

#[test]
fn test_cli_scripted_wizard_requires_contact() {
    let env = TestEnv::new();
    env.import_veranda();
    let answers = env.write(
        "no-phone.json",
        r#"{
            "answers": {"width": 300},
            "contact": {"name": "Ann", "email": "ann@example.com", "phone": ""}
        }"#,
    );

    env.cmd()
        .args(["wizard", "veranda", "--answers", &answers])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing: phone"));
}

#[test]
fn test_cli_interactive_wizard() {
    let env = TestEnv::new();
    env.import_veranda();

    // colour 2 (black), a width that is too small, then 500, "yes" at the
    // gateway, lighting 3 (spots), contact details, no appointment
    let input = "2\n50\n500\n1\n3\nAnn\nann@example.com\n0612345678\n\n\n\nn\n";
    env.cmd()
        .args(["wizard", "veranda"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Step 1 of 3"))
        .stdout(predicate::str::contains("at least 100"))
        .stdout(predicate::str::contains("## More options"))
        .stdout(predicate::str::contains("## Step 4 of 4"))
        .stdout(predicate::str::contains("# Thank you, Ann!"));

    env.cmd()
        .args(["submission", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Lighting**: Spots"))
        .stdout(predicate::str::contains("Not requested."));
}

#[test]
fn test_cli_interactive_wizard_back_command() {
    let env = TestEnv::new();
    env.import_veranda();

    // answer colour, go back, change it, then decline the optional steps
    let input = "1\n:back\n3\n400\n2\nAnn\nann@example.com\n0612345678\n\n\n\n\n";
    env.cmd()
        .args(["wizard", "veranda"])
        .write_stdin(input)
        .assert()
        .success();

    env.cmd()
        .args(["submission", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Colour**: White"))
        .stdout(predicate::str::contains("Lighting").not());
}

#[test]
fn test_cli_interactive_wizard_rejects_unknown_gateway_choice() {
    let env = TestEnv::new();
    env.import_veranda();

    // say yes, go back from lighting to the answered gateway, type something
    // that is not a choice, then decline
    let input = "1\n500\n1\n:back\nmaybe\n2\nAnn\nann@example.com\n0612345678\n\n\n\n\n";
    env.cmd()
        .args(["wizard", "veranda"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Please answer 1 (yes) or 2 (no)"));

    env.cmd()
        .args(["submission", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lighting").not());
}

#[test]
fn test_cli_interactive_wizard_input_ends_early() {
    let env = TestEnv::new();
    env.import_veranda();

    env.cmd()
        .args(["wizard", "veranda"])
        .write_stdin("2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input ended before the wizard was finished"));
}

#[test]
fn test_cli_show_missing_submission() {
    let env = TestEnv::new();

    env.cmd()
        .args(["submission", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Submission with ID 42 not found"));
}

#[test]
fn test_cli_unknown_configurator() {
    let env = TestEnv::new();

    env.cmd()
        .args(["wizard", "sauna"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sauna"));
}

#[test]
fn test_cli_demo_files() {
    let env = TestEnv::new();
    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos");

    env.cmd()
        .args(["schema", "import"])
        .arg(demos.join("veranda.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(7 steps)"));

    env.cmd()
        .args(["wizard", "veranda", "--answers"])
        .arg(demos.join("veranda-answers.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# Thank you, Ann de Vries!"));

    env.cmd()
        .args(["submission", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Glass tint**: Opal"))
        .stdout(predicate::str::contains("- **Extras**: LED lighting, Sun screens"));
}
