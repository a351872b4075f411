//! Facade re-exports wire the reactive runtime and the value debugger
//! together the way an application would use them.

use reinhardt_devtools::prelude::*;
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[serial(devtools_facade)]
fn test_prelude_wires_debugger_to_owner_signal() {
	let quantity = Signal::new(ObservedValue::from(-1));
	let on_change = Callback::new({
		let quantity = quantity.clone();
		move |next: ObservedValue| quantity.set(next)
	});
	let sink = RecordingSink::new();

	let props = ValueDebuggerProps::from_signal(quantity.clone(), "quantity").on_change(on_change);
	let debugger = ValueDebugger::new(props)
		.with_config(DebuggerConfig::for_mode(BuildMode::Development).with_capture_backtrace(false))
		.with_sink(sink.clone())
		.mount();

	assert_eq!(quantity.get_untracked(), ObservedValue::from(""));
	assert_eq!(flush_effects(), 1);
	assert_eq!(sink.reports().len(), 1);
	assert!(debugger.render().is_empty());
}

#[rstest]
fn test_module_paths_are_exposed() {
	assert!(reinhardt_devtools::value_debugger::is_sentinel(
		&reinhardt_devtools::value_debugger::ObservedValue::from("-1")
	));
	let page = reinhardt_devtools::reactive::Page::text("ok");
	assert_eq!(page.render_to_string(), "ok");
}
