//! Triad Shader Compiler Front End
//!
//! Translates backend-neutral shaders into the dialect of a rendering backend,
//! either one file at a time or in batches described by a JSON manifest.

mod errors;
mod manifest;

use clap::Parser;
use errors::ShadercError;
use manifest::Job;
use std::path::{Path, PathBuf};
use tracing::info;
use triad_shader::{Backend, DefineSet, DialectRegistry, ShaderProcessor, ShaderSource, ShadingStage, shaders};

/// Triad - Shader Dialect Translator
#[derive(Parser, Debug)]
#[command(name = "triad-shaderc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Shader file to translate
    input: Option<PathBuf>,

    /// Translate a built-in shader instead of a file (e.g. blit.frag)
    #[arg(long, conflicts_with = "input")]
    builtin: Option<String>,

    /// Shading stage (vertex, fragment)
    #[arg(short, long, default_value = "vertex")]
    stage: ShadingStage,

    /// Target backend (gles2, gles3, glcore, vulkan, metal)
    #[arg(short, long, default_value = "gles3")]
    backend: Backend,

    /// Preprocessor define active for this variant (repeatable)
    #[arg(short = 'D', long = "define")]
    defines: Vec<String>,

    /// File whose `#define` directives are added to the active defines
    #[arg(long)]
    defines_file: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON manifest of jobs to run instead of a single input
    #[arg(short, long, conflicts_with_all = ["input", "builtin"])]
    manifest: Option<PathBuf>,

    /// Print the registered backends and exit
    #[arg(long)]
    list_backends: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(args) {
        eprintln!("triad-shaderc error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), ShadercError> {
    let registry = DialectRegistry::with_defaults();

    if args.list_backends {
        for backend in Backend::ALL {
            match registry.get(backend) {
                Ok(dialect) => println!("{:<8} {}", backend, dialect.name()),
                Err(_) => println!("{:<8} (unsupported)", backend),
            }
        }
        return Ok(());
    }

    if let Some(path) = &args.manifest {
        let jobs = manifest::load(path)?;
        for job in &jobs {
            run_job(&registry, job)?;
        }
        info!("Translated {} shaders", jobs.len());
        return Ok(());
    }

    let text = match (&args.input, &args.builtin) {
        (Some(path), _) => read_source(path)?,
        (None, Some(name)) => shaders::by_name(name)
            .ok_or_else(|| ShadercError::UnknownBuiltin(name.clone()))?
            .to_string(),
        (None, None) => return Err(ShadercError::MissingInput),
    };
    let defines = collect_defines(&args.defines, args.defines_file.as_deref())?;
    let translated = translate(&registry, args.backend, args.stage, &defines, text)?;
    write_output(args.output.as_deref(), &translated)
}

/// Command-line `-D` names merged with the directives of `--defines-file`.
fn collect_defines(names: &[String], file: Option<&Path>) -> Result<DefineSet, ShadercError> {
    let mut defines: DefineSet = names.iter().collect();
    if let Some(path) = file {
        for name in DefineSet::parse_directives(&read_source(path)?).iter() {
            defines.insert(name);
        }
    }
    Ok(defines)
}

fn run_job(registry: &DialectRegistry, job: &Job) -> Result<(), ShadercError> {
    let text = read_source(&job.input)?;
    let translated = translate(registry, job.backend, job.stage, &job.defines, text)?;
    write_output(job.output.as_deref(), &translated)
}

#[tracing::instrument(skip(registry, defines, text))]
fn translate(
    registry: &DialectRegistry,
    backend: Backend,
    stage: ShadingStage,
    defines: &DefineSet,
    text: String,
) -> Result<String, ShadercError> {
    let processor = ShaderProcessor::for_backend(registry, backend)?;
    let result = processor.process(&ShaderSource::from(text), stage, defines);
    info!("Translated {} shader with {}", stage, result.dialect);
    Ok(result.source.to_string())
}

fn read_source(path: &Path) -> Result<String, ShadercError> {
    std::fs::read_to_string(path).map_err(|e| ShadercError::io(path, e))
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), ShadercError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| ShadercError::io(parent, e))?;
            }
            std::fs::write(path, text).map_err(|e| ShadercError::io(path, e))
        }
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_single_file_args() {
        let args = Args::try_parse_from([
            "triad-shaderc",
            "sky.frag",
            "--stage",
            "fragment",
            "--backend",
            "vulkan",
            "-D",
            "MULTIVIEW",
            "-D",
            "FOG",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("sky.frag")));
        assert_eq!(args.stage, ShadingStage::Fragment);
        assert_eq!(args.backend, Backend::Vulkan);
        assert_eq!(args.defines, vec!["MULTIVIEW", "FOG"]);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_collect_defines_merges_file_directives() {
        let path = std::env::temp_dir().join(format!("triad-shaderc-defines-{}.glsl", std::process::id()));
        std::fs::write(&path, "#define FOG 1\n#define MULTIVIEW\nvoid main() {}\n").unwrap();
        let args = Args::try_parse_from([
            "triad-shaderc",
            "sky.frag",
            "-D",
            "FOG",
            "--defines-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let defines = collect_defines(&args.defines, args.defines_file.as_deref()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(defines.iter().collect::<Vec<_>>(), vec!["FOG", "MULTIVIEW"]);
    }

    #[test]
    fn test_collect_defines_missing_file() {
        let path = Path::new("does-not-exist/defines.glsl");
        match collect_defines(&[], Some(path)) {
            Err(ShadercError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        assert!(Args::try_parse_from(["triad-shaderc", "a.vert", "--backend", "d3d12"]).is_err());
    }

    #[test]
    fn test_manifest_conflicts_with_input() {
        assert!(Args::try_parse_from(["triad-shaderc", "a.vert", "--manifest", "jobs.json"]).is_err());
    }

    #[test]
    fn test_translate_builtin() {
        let registry = DialectRegistry::with_defaults();
        let out = translate(
            &registry,
            Backend::Gles3,
            ShadingStage::Fragment,
            &DefineSet::new(),
            shaders::BLIT_FRAGMENT.to_string(),
        )
        .unwrap();
        assert!(out.contains("layout(location = 0) out vec4 glFragColor;"));
    }

    #[test]
    fn test_translate_unsupported_backend() {
        let registry = DialectRegistry::with_defaults();
        let result = translate(
            &registry,
            Backend::Metal,
            ShadingStage::Vertex,
            &DefineSet::new(),
            String::new(),
        );
        match result {
            Err(ShadercError::Dialect(triad_shader::DialectError::UnsupportedBackend(Backend::Metal))) => {}
            other => panic!("Expected UnsupportedBackend error, got {:?}", other),
        }
    }
}
