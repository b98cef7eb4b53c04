pub fn create_default_config() -> String {
    // Raw JSON keeps the field order readable for users editing the file
    r#"{
  "metadata_directory": "target/classes",
  "metadata_includes": "**/*.jdo, **/*.class",
  "plugin_artifacts": [],
  "classpath_elements": [],
  "logging": {},
  "verbose": false,
  "quiet": false,
  "fork": true,
  "api": "JDO",
  "enhancer": {
    "always_detachable": false,
    "ignore_metadata_for_missing_classes": false,
    "generate_pk": true,
    "generate_constructor": true,
    "detach_listener": false,
    "use_file_list_file": "auto",
    "file_list_threshold": 8000
  },
  "schema": {
    "tool_properties": {},
    "complete_ddl": false,
    "include_auto_start": false
  }
}
"#
    .to_string()
}
