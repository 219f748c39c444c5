// ABOUTME: Integration tests for the CLI application
// ABOUTME: Drives the built binary through rendering, registration, reporting and import

use std::path::Path;
use std::process::{Command, Output};

mod common;
use common::TestEnvironment;

fn scriptdesk(config: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_scriptdesk"))
        .arg("--config")
        .arg(config)
        .arg("--no-color")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    if !output.status.success() {
        println!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
        println!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
    }
    output
}

#[test]
fn test_cli_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_scriptdesk"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("scriptdesk"));
    assert!(stdout.contains("register"));
    assert!(stdout.contains("--help"));
}

#[test]
fn test_cli_version_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_scriptdesk"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_cli_templates_menu_order() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(&config, &["templates", "--sector", "sac"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("SAC templates (56)"));
    assert_eq!(lines.last().map(|l| l.trim()), Some("OUTROS  [free text]"));
}

#[tokio::test]
async fn test_cli_show_template() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(
        &config,
        &["show", "OFERECER DESCONTO POR AVARIA", "--sector", "sac"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Kind: scripted"));
    assert!(stdout.contains("valor_desconto"));
    assert!(stdout.contains("R$ {valor_desconto}"));
}

#[tokio::test]
async fn test_cli_render_ausente() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(
        &config,
        &[
            "render",
            "AUSENTE",
            "--carrier",
            "PATRUS",
            "--collaborator",
            "Ana",
            "--client",
            "João",
            "--order",
            "4521",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Olá, João!"));
    assert!(stdout.contains("pedido de número 4521..."));
    assert!(stdout.contains("A transportadora PATRUS tentou"));
    assert!(stdout.trim_end().ends_with("Ana"));

    // Rendering never writes to the log
    assert!(!env.log_file().exists());
}

#[tokio::test]
async fn test_cli_render_with_fields() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(
        &config,
        &[
            "render",
            "OFERECER DESCONTO POR AVARIA",
            "-s",
            "sac",
            "-F",
            "valor_desconto=120,00",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("R$ 120,00"));
}

#[tokio::test]
async fn test_cli_render_unknown_key_fails() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(&config, &["render", "NÃO EXISTE"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NÃO EXISTE"));
}

#[tokio::test]
async fn test_cli_render_invalid_field_fails() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(&config, &["render", "AUSENTE", "-F", "sem_valor"]);
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_cli_register_then_report() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(
        &config,
        &[
            "register",
            "ATENDIMENTO DIGISAC",
            "--collaborator",
            "Ana",
            "--portal",
            "SHOPEE",
            "--invoice",
            "123",
            "--order",
            "456",
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Registered 'ATENDIMENTO DIGISAC' (Pendência)"));

    let log = tokio::fs::read_to_string(env.log_file()).await.unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.contains(";Pendência;Ana;ATENDIMENTO DIGISAC;SHOPEE;123;456;-;-"));

    let output = scriptdesk(&config, &["report"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Total: 1  SAC: 0  Pendências: 1"));

    let output = scriptdesk(&config, &["report", "--format", "json", "--sector", "sac"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report should print JSON");
    assert_eq!(value["total"], 0);
}

#[tokio::test]
async fn test_cli_register_requires_collaborator() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(&config, &["register", "AUSENTE"]);
    assert!(!output.status.success());
    assert!(!env.log_file().exists());
}

#[tokio::test]
async fn test_cli_report_export() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(
        &config,
        &["register", "SAUDAÇÃO", "-s", "sac", "--collaborator", "Tamara"],
    );
    assert!(output.status.success());

    let export = env.path().join("relatorio.csv");
    let output = scriptdesk(
        &config,
        &["report", "--export", export.to_str().unwrap()],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("✓ Exported 1 rows"));

    let bytes = tokio::fs::read(&export).await.unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
}

#[tokio::test]
async fn test_cli_import_backup() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;
    let backup = env
        .write_file(
            "backup.csv",
            "Data;Hora;Setor;Colaborador;Motivo;Portal;Nota_Fiscal;Numero_Pedido;Motivo_CRM;Transportadora\n\
             02/01/2024;10:00:00;Pendência;Ana;AUSENTE;SHOPEE;1;2;AUSENTE;PATRUS\n",
        )
        .await;

    let output = scriptdesk(&config, &["import", backup.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("✓ Imported 1 rows"));

    // A populated log needs --force
    let output = scriptdesk(&config, &["import", backup.to_str().unwrap()]);
    assert!(!output.status.success());

    let output = scriptdesk(&config, &["import", backup.to_str().unwrap(), "--force"]);
    assert!(output.status.success());
}

#[tokio::test]
async fn test_cli_lists_and_check() {
    let env = TestEnvironment::new();
    let config = env.write_config("").await;

    let output = scriptdesk(&config, &["lists", "carriers"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout)
        .lines()
        .any(|l| l == "JADLOG"));

    let output = scriptdesk(&config, &["lists", "collaborators", "--sector", "sac"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout)
        .lines()
        .any(|l| l == "Tamara"));

    let output = scriptdesk(&config, &["check"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Pendência catalog: 20 templates"));
    assert!(stdout.contains("✓ SAC catalog: 56 templates"));
}

#[tokio::test]
async fn test_cli_check_reports_uncovered_tokens() {
    let env = TestEnvironment::new();
    let catalog = env
        .write_file(
            "pendencias.yaml",
            "sector: pendencia\ntemplates:\n  - key: TESTE\n    body: \"Olá, {nome_cliente}\\nData: {data_coleta}\"\n",
        )
        .await;
    let config = env
        .write_config(&format!("catalog:\n  logistics: {}\n", catalog.display()))
        .await;

    let output = scriptdesk(&config, &["check"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TESTE: unsubstituted data_coleta"));
}
