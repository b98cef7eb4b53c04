use nucleus_runner_core::{PlannedInvocation, ToolCommand, command::FileArguments};

pub fn print_command_breakdown(plan: &PlannedInvocation, command: &ToolCommand) {
    println!("   🔧 Command breakdown:");
    println!("      • operation: {}", plan.operation);
    println!("      • tool: {}", plan.tool());
    println!("      • java: {}", command.program.display());

    println!("      • classpath:");
    for entry in plan.classpath.entries() {
        println!("         - {}", entry.display());
    }

    if !plan.jvm_properties.is_empty() {
        println!("      • systemProperties:");
        for (key, value) in &plan.jvm_properties {
            println!("         - {}={}", key, value);
        }
    }

    if let Some(logging) = &plan.logging {
        println!("      • logging: {}", logging.to_jvm_arg());
    }

    println!("      • toolArgs: {:?}", plan.arguments.args);

    match &plan.arguments.files {
        FileArguments::None => println!("      • files: supplied by the persistence unit"),
        FileArguments::Inline(files) => println!("      • files: {} inline", files.len()),
        FileArguments::ListFile(files) => {
            println!("      • files: {} via file list (-flf)", files.len())
        }
    }
}
