//! MSBuild project file generation

use crate::parser::ProjectDescriptor;
use std::fmt::Write;
use std::path::Path;

/// Render the project file for a descriptor
///
/// `compile_item` is the source copy inside the workspace. Package feeds
/// are not written; restore uses the feeds configured for the machine.
pub fn render(descriptor: &ProjectDescriptor, compile_item: &Path) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, r#"<Project Sdk="{}">"#, escape(descriptor.sdk()));

    out.push_str("    <PropertyGroup>\n");
    out.push_str("        <OutputType>exe</OutputType>\n");
    out.push_str("        <LangVersion>latest</LangVersion>\n");
    let _ = writeln!(
        out,
        "        <TargetFramework>{}</TargetFramework>",
        escape(descriptor.target_framework())
    );
    out.push_str("    </PropertyGroup>\n");

    out.push_str("    <ItemGroup>\n");
    let _ = writeln!(
        out,
        r#"        <Compile Include="{}" />"#,
        escape(&compile_item.to_string_lossy())
    );
    for package in descriptor.packages() {
        let _ = writeln!(
            out,
            r#"        <PackageReference Include="{}" Version="{}" />"#,
            escape(package.name()),
            escape(package.version())
        );
    }
    out.push_str("    </ItemGroup>\n");

    out.push_str("</Project>\n");
    out
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
