use crate::app::command_support::{open_session, take_value, GlobalOptions};
use crate::app::session::FormSession;
use crate::form::ScalarField;
use crate::prompt::{normalize_param_key, EngineMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct PromptRequest {
    preset: Option<String>,
    scalars: Vec<(ScalarField, String)>,
    selections: Vec<(String, Vec<String>)>,
    engine: Option<EngineMode>,
    params: Vec<(String, String)>,
    random: bool,
    rng_seed: Option<u64>,
    out: Option<PathBuf>,
}

fn is_engine_param(key: &str) -> bool {
    EngineMode::ALL.iter().any(|mode| mode.accepts(key))
}

fn parse_select(raw: &str) -> Result<(String, Vec<String>), String> {
    let (category, options) = raw
        .split_once('=')
        .ok_or_else(|| "--select requires <category>=<option>[;<option>]".to_string())?;
    let category = category.trim();
    if category.is_empty() {
        return Err("--select requires a category name".to_string());
    }
    let options: Vec<String> = options
        .split(';')
        .map(|option| option.trim().to_string())
        .filter(|option| !option.is_empty())
        .collect();
    Ok((category.to_string(), options))
}

fn parse_prompt_args(args: &[String]) -> Result<PromptRequest, String> {
    let mut request = PromptRequest::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let scalar = match flag {
            "--subject" => Some(ScalarField::Subject),
            "--action" => Some(ScalarField::Action),
            "--environment" => Some(ScalarField::Environment),
            "--notes" => Some(ScalarField::Notes),
            _ => None,
        };
        if let Some(field) = scalar {
            request
                .scalars
                .push((field, take_value(args, i, flag)?.to_string()));
            i += 2;
            continue;
        }

        match flag {
            "--preset" => {
                request.preset = Some(take_value(args, i, flag)?.to_string());
                i += 2;
            }
            "--select" => {
                request.selections.push(parse_select(take_value(args, i, flag)?)?);
                i += 2;
            }
            "--engine" => {
                request.engine = Some(EngineMode::parse(take_value(args, i, flag)?)?);
                i += 2;
            }
            "--random" => {
                request.random = true;
                i += 1;
            }
            "--rng-seed" => {
                let raw = take_value(args, i, flag)?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--rng-seed must be a non-negative integer, got `{raw}`"))?;
                request.rng_seed = Some(seed);
                i += 2;
            }
            "--out" => {
                request.out = Some(PathBuf::from(take_value(args, i, flag)?));
                i += 2;
            }
            other if other.starts_with("--") && is_engine_param(&normalize_param_key(other)) => {
                request
                    .params
                    .push((normalize_param_key(other), take_value(args, i, other)?.to_string()));
                i += 2;
            }
            other => return Err(format!("unknown option `{other}`")),
        }
    }
    Ok(request)
}

fn apply_request(session: &mut FormSession, request: &PromptRequest) -> Result<(), String> {
    if let Some(name) = &request.preset {
        session.apply_preset(name)?;
    }
    if let Some(mode) = request.engine {
        session.state.engine_mut().mode = mode;
    }
    for (field, value) in &request.scalars {
        session.state.set_scalar(*field, value.as_str());
    }
    for (category, options) in &request.selections {
        for option in options {
            session.select(category, option)?;
        }
    }
    for (key, value) in &request.params {
        session.state.set_param(key, value);
    }
    if request.random {
        let mut rng = match request.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        session.random_fill(&mut rng);
    }
    Ok(())
}

pub fn cmd_prompt(options: &GlobalOptions, args: &[String]) -> Result<String, String> {
    let request = parse_prompt_args(args)?;
    let mut session = open_session(options)?;
    apply_request(&mut session, &request)?;
    match &request.out {
        Some(path) => session.export(path),
        None => Ok(session.prompt()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_scalars_selections_and_engine_params() {
        let request = parse_prompt_args(&args(&[
            "--subject",
            "a fox",
            "--select",
            "Lighting=Neon; Golden-hour glow",
            "--engine",
            "mj",
            "--ar",
            "16:9",
            "--random",
            "--rng-seed",
            "5",
        ]))
        .expect("parse");

        assert_eq!(
            request.scalars,
            vec![(ScalarField::Subject, "a fox".to_string())]
        );
        assert_eq!(
            request.selections,
            vec![(
                "Lighting".to_string(),
                vec!["Neon".to_string(), "Golden-hour glow".to_string()]
            )]
        );
        assert_eq!(request.engine, Some(EngineMode::Midjourney));
        assert_eq!(request.params, vec![("--ar".to_string(), "16:9".to_string())]);
        assert!(request.random);
        assert_eq!(request.rng_seed, Some(5));
    }

    #[test]
    fn rejects_unknown_flags_and_missing_values() {
        assert_eq!(
            parse_prompt_args(&args(&["--colour", "red"])).expect_err("unknown flag"),
            "unknown option `--colour`"
        );
        assert_eq!(
            parse_prompt_args(&args(&["--subject"])).expect_err("missing value"),
            "missing value for --subject"
        );
        assert!(parse_prompt_args(&args(&["--select", "Lighting"])).is_err());
        assert!(parse_prompt_args(&args(&["--rng-seed", "-1"])).is_err());
    }
}
