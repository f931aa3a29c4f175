use fibre_container::{
  CompositeCachingServiceProvider, ContainerExt, DelegatingContainer, Provider, ServiceProvider,
};
use std::sync::Arc;

trait Command: Send + Sync {
  fn name(&self) -> &str;
}

struct Named(&'static str);
impl Command for Named {
  fn name(&self) -> &str {
    self.0
  }
}

fn command(name: &'static str) -> Arc<dyn Command> {
  Arc::new(Named(name))
}

fn main() -> fibre_container::Result<()> {
  // Two modules contribute commands to the same "commands" tag.
  let core = ServiceProvider::builder()
    .factory("cmd.help", |_| Ok(command("help")))
    .tag("cmd.help", "commands")
    .factory("cmd.version", |_| Ok(command("version")))
    .tag("cmd.version", "commands")
    .build_tagged()?;

  let plugin = ServiceProvider::builder()
    .factory("cmd.deploy", |_| Ok(command("deploy")))
    .tag("cmd.deploy", "commands")
    .build_tagged()?;

  let providers: Vec<Arc<dyn Provider>> = vec![Arc::new(core), Arc::new(plugin)];
  let container = DelegatingContainer::new(Arc::new(CompositeCachingServiceProvider::new(providers)));

  let commands = container.get_tagged("commands")?;
  let names: Vec<String> = commands
    .iter()
    .filter_map(|service| service.clone().downcast::<Arc<dyn Command>>().ok())
    .map(|cmd| cmd.name().to_string())
    .collect();

  println!("Available commands: {}", names.join(", "));
  assert_eq!(names, ["help", "version", "deploy"]);
  Ok(())
}
