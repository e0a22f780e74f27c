use crate::output::{compliance_label, swatch, write_json};
use crate::Result;
use color_engine::{audit_palette, repair_palette, PairCheck, PaletteStore, Role, SitePalette};
use serde::Serialize;

pub struct AuditArgs<'a, W: std::io::Write, S: PaletteStore> {
    pub store: &'a mut S,
    /// Replace failing roles with their suggestions and save the result.
    pub fix: bool,
    pub json: bool,
    pub stdout: &'a mut W,
}

#[derive(Debug, Serialize)]
struct AuditReport {
    palette: SitePalette,
    checks: Vec<PairCheck>,
    /// The repaired palette, present only when it was saved.
    fixed: Option<SitePalette>,
    /// Checks the repaired palette still fails.
    unresolved: Vec<PairCheck>,
}

pub fn run<W: std::io::Write, S: PaletteStore>(args: AuditArgs<W, S>) -> Result<()> {
    let palette = args.store.load()?.ok_or_else(|| {
        crate::Error::General(String::from(
            "No palette found. Run `huecheck generate <color> --save` first",
        ))
    })?;

    let checks = audit_palette(&palette);
    let passing = checks.iter().all(|c| c.result.compliance.passes());

    let repaired = repair_palette(&palette);
    let unresolved: Vec<PairCheck> = audit_palette(&repaired)
        .into_iter()
        .filter(|c| !c.result.compliance.passes())
        .collect();
    let changed: Vec<Role> = Role::ALL
        .into_iter()
        .filter(|role| repaired.get(*role) != palette.get(*role))
        .collect();

    let fixed = if args.fix && !passing && unresolved.is_empty() {
        args.store.save(&repaired)?;
        Some(repaired.clone())
    } else {
        None
    };

    if args.json {
        return write_json(
            args.stdout,
            &AuditReport {
                palette,
                checks,
                fixed,
                unresolved,
            },
        );
    }

    for check in &checks {
        writeln!(
            args.stdout,
            "{:<10} {} {} on {:<10} {} {}  {:>6.2}:1  {}",
            check.foreground.as_str(),
            swatch(&check.foreground_hex),
            check.foreground_hex,
            check.background.as_str(),
            swatch(&check.background_hex),
            check.background_hex,
            check.result.ratio,
            compliance_label(check.result.compliance)
        )?;
    }

    if passing {
        writeln!(args.stdout, "All contrast checks pass")?;
        return Ok(());
    }

    writeln!(args.stdout)?;
    writeln!(args.stdout, "Suggestions")?;
    for role in &changed {
        writeln!(
            args.stdout,
            "  {:<10} {} -> {} {}",
            role.as_str(),
            palette.get(*role),
            swatch(repaired.get(*role)),
            repaired.get(*role)
        )?;
    }

    for check in &unresolved {
        writeln!(
            args.stdout,
            "  {} on {} still fails at {:.2}:1",
            check.foreground.as_str(),
            check.background.as_str(),
            check.result.ratio
        )?;
    }

    if fixed.is_some() {
        writeln!(args.stdout, "Saved fixed palette")?;
    } else if args.fix {
        writeln!(args.stdout, "No passing palette found, nothing saved")?;
    }

    Ok(())
}
