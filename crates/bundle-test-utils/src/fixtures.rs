//! Canonical content for every file of the Android bundle.

use bundle_fs::BundleFile;

/// Manifest declaring `profile` and the full built-in file list.
pub fn manifest_content(profile: &str) -> String {
    let required = BundleFile::ALL
        .iter()
        .map(|f| format!("    \"{}\",", f.as_str()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "schema_version = 1\nprofile = \"{profile}\"\nbundle_name = \"default\"\n\n[file_list]\nrequired = [\n{required}\n]\n"
    )
}

/// Valid TOML content for `file`. The manifest declares `android`.
pub fn sample_content(file: BundleFile) -> String {
    match file {
        BundleFile::Config => {
            "[general]\ndatabase = \"time_data.sqlite3\"\nexport_format = \"markdown\"\n".to_string()
        }
        BundleFile::Manifest => manifest_content("android"),
        BundleFile::IntervalProcessor => {
            "[interval]\nmerge_gap_minutes = 5\nday_start = \"04:00\"\n".to_string()
        }
        BundleFile::AliasMapping => "[aliases]\nmeal = \"eat\"\nsleep = \"rest\"\n".to_string(),
        BundleFile::DurationRules => {
            "[[rules]]\nactivity = \"rest\"\nmin_minutes = 30\n".to_string()
        }
        BundleFile::DayReport => report_template("Daily"),
        BundleFile::MonthReport => report_template("Monthly"),
        BundleFile::PeriodReport => report_template("Period"),
        BundleFile::WeekReport => report_template("Weekly"),
        BundleFile::YearReport => report_template("Yearly"),
    }
}

fn report_template(title: &str) -> String {
    format!("title = \"{title} Report\"\nshow_totals = true\n\n[columns]\nprecision = 1\n")
}

/// Every bundle file as `(canonical path, content)`, in commit order.
pub fn android_files() -> Vec<(String, String)> {
    BundleFile::ALL
        .iter()
        .map(|f| (f.as_str().to_string(), sample_content(*f)))
        .collect()
}

/// Like [`android_files`] but with every content changed, so an import of
/// these is observable.
pub fn updated_android_files() -> Vec<(String, String)> {
    android_files()
        .into_iter()
        .map(|(path, content)| {
            let content = if path == BundleFile::Manifest.as_str() {
                content.replace("bundle_name = \"default\"", "bundle_name = \"updated\"")
            } else {
                format!("{content}updated = true\n")
            };
            (path, content)
        })
        .collect()
}
