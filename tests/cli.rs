use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PLAN: &str = "# План на март 2025\n\
\n\
## Планируемые доходы\n\
\n\
| Дата | Источник | Сумма (руб.) | Примечание |\n\
|------|----------|--------------|------------|\n\
| 05.03.2025 | Зарплата | 80 000 | |\n\
| **Итого** | | **80 000** | |\n\
\n\
## Планируемые расходы\n\
\n\
| Категория | Сумма (руб.) | Срок оплаты | Примечание |\n\
|-----------|--------------|-------------|------------|\n\
| Транспорт | 1 500 | 10.03.2025 | |\n\
| Аренда жилья | 30 000 | 01.03.2025 | |\n\
| **Итого** | **31 500** | | |\n";

const PLAN_PATH: &str = "personal/Finances/2025/Plans/Plan_2025_03.md";
const FACT_PATH: &str = "personal/Finances/2025/Facts/Fact_2025_03.md";

struct Env {
    repo: TempDir,
    data: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            repo: TempDir::new().unwrap(),
            data: TempDir::new().unwrap(),
        }
    }

    fn with_plan() -> Self {
        let env = Self::new();
        env.write(PLAN_PATH, PLAN);
        env
    }

    fn write(&self, rel: &str, text: &str) {
        let full = self.repo.path().join(rel);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, text).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.repo.path().join(rel)).unwrap()
    }

    fn repo_path(&self) -> &Path {
        self.repo.path()
    }

    /// Command against GitHub (no --local), isolated data dir, no token
    fn remote(&self) -> Command {
        let mut cmd = Command::cargo_bin("findash").unwrap();
        cmd.env("FINDASH_DATA_DIR", self.data.path())
            .env_remove("FINDASH_GITHUB_TOKEN")
            .env_remove("FINDASH_LOCAL_REPO")
            .env_remove("FINDASH_HOST_THEME")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Command against the local checkout
    fn cmd(&self) -> Command {
        let mut cmd = self.remote();
        cmd.arg("--local").arg(self.repo.path());
        cmd
    }
}

#[test]
fn no_command_prints_usage_hint() {
    let env = Env::new();
    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("findash tui"));
}

#[test]
fn show_without_files_prints_no_data() {
    let env = Env::new();
    env.cmd()
        .args(["show", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data for 2025-03"));
}

#[test]
fn show_renders_plan_totals() {
    let env = Env::with_plan();
    env.cmd()
        .args(["show", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Транспорт"))
        .stdout(predicate::str::contains("80 000 ₽"))
        .stdout(predicate::str::contains("31 500 ₽"));
}

#[test]
fn show_rejects_bad_period() {
    let env = Env::new();
    env.cmd()
        .args(["show", "-p", "2025-13"])
        .assert()
        .failure();
}

#[test]
fn local_repo_can_come_from_environment() {
    let env = Env::with_plan();
    env.remote()
        .env("FINDASH_LOCAL_REPO", env.repo_path())
        .args(["show", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Аренда жилья"));
}

#[test]
fn income_add_lands_in_plan_and_totals() {
    let env = Env::with_plan();
    env.cmd()
        .args([
            "income", "add", "--source", "Премия", "--amount", "5000", "--date", "15.03.2025",
            "-p", "2025-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added income to plan 2025-03"));

    let text = env.read(PLAN_PATH);
    let salary = text.find("Зарплата").unwrap();
    let bonus = text.find("Премия").unwrap();
    let total = text.find("**Итого**").unwrap();
    assert!(salary < bonus && bonus < total);
    assert!(text.contains("| Транспорт | 1 500 | 10.03.2025 | |"));

    env.cmd()
        .args(["show", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("85 000 ₽"));
}

#[test]
fn income_add_to_missing_fact_creates_file() {
    let env = Env::new();
    env.cmd()
        .args([
            "income", "add", "-s", "Зарплата", "-a", "80 000", "-d", "05.03.2025", "--fact",
            "-p", "2025-03",
        ])
        .assert()
        .success();

    let text = env.read(FACT_PATH);
    assert!(text.contains("Зарплата"));
}

#[test]
fn income_add_rejects_bad_amount() {
    let env = Env::with_plan();
    env.cmd()
        .args(["income", "add", "-s", "Премия", "-a", "abc", "-p", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
    assert_eq!(env.read(PLAN_PATH), PLAN);
}

#[test]
fn expense_add_and_list() {
    let env = Env::with_plan();
    env.cmd()
        .args([
            "expense", "add", "-c", "Связь", "-a", "700", "--due", "20.03.2025", "-p", "2025-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Связь 700 ₽"));

    env.cmd()
        .args(["expense", "list", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Связь"))
        .stdout(predicate::str::contains("Аренда жилья"));
}

#[test]
fn expense_list_without_plan() {
    let env = Env::new();
    env.cmd()
        .args(["expense", "list", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data for 2025-03"));
}

#[test]
fn expense_pay_by_row_moves_it_to_paid() {
    let env = Env::with_plan();
    env.cmd()
        .args(["expense", "pay", "1", "-d", "12.03.2025", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Marked as paid: Транспорт 1 500 ₽ on 12.03.2025",
        ));

    let text = env.read(PLAN_PATH);
    assert!(!text.contains("| Транспорт | 1 500 | 10.03.2025 | |"));
    assert!(text.contains("12.03.2025"));
    assert!(text.contains("| Аренда жилья | 30 000 | 01.03.2025 | |"));
}

#[test]
fn expense_pay_by_value() {
    let env = Env::with_plan();
    env.cmd()
        .args([
            "expense", "pay", "-c", "Аренда жилья", "-a", "30000", "-p", "2025-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Аренда жилья"));
}

#[test]
fn expense_pay_unknown_value_leaves_file_alone() {
    let env = Env::with_plan();
    env.cmd()
        .args(["expense", "pay", "-c", "Транспорт", "-a", "999", "-p", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no planned expense"));
    assert_eq!(env.read(PLAN_PATH), PLAN);
}

#[test]
fn expense_pay_needs_a_selector() {
    let env = Env::with_plan();
    env.cmd()
        .args(["expense", "pay", "-p", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("row number"));
}

#[test]
fn expense_pay_without_plan_fails() {
    let env = Env::new();
    env.cmd()
        .args(["expense", "pay", "1", "-p", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no plan for"));
}

#[test]
fn expense_categories_lists_defaults() {
    let env = Env::new();
    env.cmd()
        .args(["expense", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Продукты питания"))
        .stdout(predicate::str::contains("Коммунальные услуги"));
}

#[test]
fn export_csv_to_stdout() {
    let env = Env::with_plan();
    env.cmd()
        .args(["export", "-p", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "file,table,position,date,label,amount,note",
        ))
        .stdout(predicate::str::contains("plan,expenses,1,10.03.2025,Транспорт,1500.00,"));
}

#[test]
fn export_json_to_file() {
    let env = Env::with_plan();
    let out: PathBuf = env.data.path().join("march.json");
    env.cmd()
        .args(["export", "--format", "json", "-p", "2025-03", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(json["period"]["year"], 2025);
    assert!(json["plan"].is_object());
    assert!(json["fact"].is_null());
}

#[test]
fn export_of_empty_month_fails() {
    let env = Env::new();
    env.cmd()
        .args(["export", "-p", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to export"));
}

#[test]
fn analytics_reports_year() {
    let env = Env::with_plan();
    env.cmd()
        .args(["analytics", "-y", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analytics 2025"))
        .stdout(predicate::str::contains("March"));
}

#[test]
fn analytics_without_files_prints_no_data() {
    let env = Env::new();
    env.cmd()
        .args(["analytics", "-y", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data for 2024"));
}

#[test]
fn config_show_and_set() {
    let env = Env::new();
    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("currency_symbol: ₽"));

    env.cmd()
        .args(["config", "set", "currency_symbol", "$"])
        .assert()
        .success();

    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("currency_symbol: $"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let env = Env::new();
    env.cmd()
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn token_set_status_clear() {
    let env = Env::new();
    env.cmd()
        .args(["token", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No token configured"));

    env.cmd()
        .args(["token", "set", "ghp_abcdefghijklmnop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved token"))
        .stdout(predicate::str::contains("ghp_abcdefghijklmnop").not());

    env.cmd()
        .args(["token", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from token file"));

    env.cmd()
        .args(["token", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    env.cmd()
        .args(["token", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No token configured"));
}

#[test]
fn remote_write_without_token_explains_setup() {
    let env = Env::new();
    env.remote()
        .args(["income", "add", "-s", "Премия", "-a", "5000", "-p", "2025-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("findash token set"))
        .stderr(predicate::str::contains("FINDASH_GITHUB_TOKEN"));
}
