use public_forms_core::{BlockIdentity, FormAction};
use public_forms_pages::contenttypes::ContentType;
use public_forms_pages::error::RenderError;
use public_forms_pages::forms::CharField;
use public_forms_pages::model::{ContentRef, ContentSource, MemoryContentSource, PublicFormBlock};
use public_forms_pages::renderers::{CreateFormView, PublicFormView, renderer_for};
use public_forms_pages::request::{FormRequest, Session};
use public_forms_pages::settings::Settings;
use serde_json::{Map, Value, json};

fn entry_source() -> MemoryContentSource {
	MemoryContentSource::new(
		ContentType::new("guestbook", "entry"),
		vec![
			CharField::new("name"),
			CharField::new("message").optional(),
		],
	)
}

fn seeded_source(id: i64, name: &str) -> MemoryContentSource {
	let mut source = entry_source();
	let mut data = Map::new();
	data.insert("name".to_string(), json!(name));
	source.insert(id, data);
	source
}

fn block(action: FormAction) -> PublicFormBlock {
	PublicFormBlock::new(
		BlockIdentity::new("test22", "first_col", 0),
		action,
		ContentRef::new(ContentType::new("guestbook", "entry")),
		&Settings::default(),
	)
}

fn block_with_object(action: FormAction, id: i64) -> PublicFormBlock {
	PublicFormBlock::new(
		BlockIdentity::new("test22", "first_col", 0),
		action,
		ContentRef::new(ContentType::new("guestbook", "entry")).with_object_id(id),
		&Settings::default(),
	)
}

#[test]
fn create_blocks_have_no_object_to_resolve() {
	let view = CreateFormView::new(block(FormAction::Create), Settings::default());
	let object = view.resolve_object(&entry_source()).unwrap();
	assert!(object.is_none());
}

#[test]
fn non_owner_requests_render_a_fresh_unbound_form() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let request = FormRequest::get("/page/");

	let rendered = view.render(&request, &entry_source()).unwrap();
	assert_eq!(rendered.wrapper_id, "test22_first_col_0_public_form");
	assert!(rendered.html.contains(r#"<div id="test22_first_col_0_public_form">"#));
	assert!(rendered.html.contains(r#"name="test22_first_col_0-name""#));
	assert!(rendered.html.contains(r#"name="test22_first_col_0_create""#));
	assert!(!rendered.html.contains("errorlist"));
}

#[test]
fn ownership_comes_from_a_bare_query_probe() {
	for action in FormAction::ALL {
		let view = renderer_for(block(action), Settings::default());
		let probe = format!("/page/?test22_first_col_0{}", action.suffix());
		assert!(view.is_request_owner(&FormRequest::get(&probe)));
		assert!(!view.is_request_owner(&FormRequest::get("/page/")));
	}
}

#[test]
fn ownership_comes_from_the_post_body_too() {
	for action in FormAction::ALL {
		let view = renderer_for(block(action), Settings::default());
		let submit = format!("test22_first_col_0{}", action.suffix());
		let request = FormRequest::post("/page/", &[(submit.as_str(), "1")]);
		assert!(view.is_request_owner(&request));
	}
}

#[test]
fn owning_one_block_does_not_own_its_neighbors() {
	let create = renderer_for(block(FormAction::Create), Settings::default());
	let delete = renderer_for(block_with_object(FormAction::Delete, 1), Settings::default());
	let request = FormRequest::get("/page/?test22_first_col_0_create");

	assert!(create.is_request_owner(&request));
	assert!(!delete.is_request_owner(&request));
}

#[test]
fn valid_owner_post_creates_and_redirects_to_the_page() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
			("test22_first_col_0-message", "hello"),
		],
	);

	let redirect = view.finalize(&mut request, &mut source).unwrap().unwrap();
	assert_eq!(redirect.location, "/page/");
	assert_eq!(source.len(), 1);
	let created = source.get(1).unwrap().unwrap();
	assert_eq!(created.data["name"], json!("Ada"));
	assert_eq!(created.data["message"], json!("hello"));
}

#[test]
fn invalid_owner_post_performs_nothing_and_rerenders_errors() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-message", "no name given"),
		],
	);

	assert!(view.finalize(&mut request, &mut source).unwrap().is_none());
	assert!(source.is_empty());

	let rendered = view.render(&request, &source).unwrap();
	assert!(rendered.html.contains("errorlist"));
	assert!(rendered.html.contains("This field is required."));
	assert!(rendered.html.contains(r#"value="no name given""#));
}

#[test]
fn non_owner_posts_never_bind() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("other_block_2_create", "1"),
			("test22_first_col_0-name", "Ada"),
		],
	);

	assert!(view.finalize(&mut request, &mut source).unwrap().is_none());
	assert!(source.is_empty());
	let rendered = view.render(&request, &source).unwrap();
	assert!(!rendered.html.contains("errorlist"));
}

#[test]
fn owner_get_probes_render_bound_nothing_and_perform_nothing() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::get("/page/?test22_first_col_0_create");

	assert!(view.finalize(&mut request, &mut source).unwrap().is_none());
	let rendered = view.render(&request, &source).unwrap();
	assert!(!rendered.html.contains("errorlist"));
	assert!(source.is_empty());
}

#[test]
fn update_blocks_prefill_from_the_stored_object() {
	let view = renderer_for(block_with_object(FormAction::Update, 7), Settings::default());
	let source = seeded_source(7, "Ada");
	let rendered = view.render(&FormRequest::get("/page/"), &source).unwrap();
	assert!(rendered.html.contains(r#"value="Ada""#));
}

#[test]
fn valid_owner_post_updates_the_object() {
	let view = renderer_for(block_with_object(FormAction::Update, 7), Settings::default());
	let mut source = seeded_source(7, "Ada");
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_update", "1"),
			("test22_first_col_0-name", "Grace"),
		],
	);

	let redirect = view.finalize(&mut request, &mut source).unwrap().unwrap();
	assert_eq!(redirect.location, "/page/");
	assert_eq!(source.get(7).unwrap().unwrap().data["name"], json!("Grace"));
}

#[test]
fn delete_confirmations_carry_no_content_fields() {
	let view = renderer_for(block_with_object(FormAction::Delete, 7), Settings::default());
	let source = seeded_source(7, "Ada");
	let rendered = view.render(&FormRequest::get("/page/"), &source).unwrap();

	assert!(!rendered.html.contains(r#"type="text""#));
	assert!(rendered.html.contains(r#"name="test22_first_col_0_delete""#));
}

#[test]
fn valid_owner_post_deletes_the_object() {
	let view = renderer_for(block_with_object(FormAction::Delete, 7), Settings::default());
	let mut source = seeded_source(7, "Ada");
	let mut request =
		FormRequest::post("/page/", &[("test22_first_col_0_delete", "1")]);

	let redirect = view.finalize(&mut request, &mut source).unwrap().unwrap();
	assert_eq!(redirect.location, "/page/");
	assert!(source.is_empty());
}

#[test]
fn object_bound_blocks_need_an_object_id() {
	let view = renderer_for(block(FormAction::Update), Settings::default());
	let result = view.render(&FormRequest::get("/page/"), &entry_source());
	assert!(matches!(result, Err(RenderError::MissingObjectId { .. })));
}

#[test]
fn dangling_object_ids_surface_as_missing_objects() {
	let view = renderer_for(block_with_object(FormAction::Update, 99), Settings::default());
	let result = view.render(&FormRequest::get("/page/"), &entry_source());
	assert!(matches!(
		result,
		Err(RenderError::MissingObject { id: 99, .. })
	));
}

#[test]
fn configured_success_urls_win_over_the_page() {
	let block = block(FormAction::Create).with_success_url("/thanks/");
	let view = renderer_for(block, Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
		],
	);

	let redirect = view.finalize(&mut request, &mut source).unwrap().unwrap();
	assert_eq!(redirect.location, "/thanks/");
}

#[test]
fn empty_success_urls_fall_back_to_the_object_url() {
	let block = block(FormAction::Create).with_success_url("");
	let view = renderer_for(block, Settings::default());
	let mut source = entry_source().with_url_base("/entries/");
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
		],
	);

	let redirect = view.finalize(&mut request, &mut source).unwrap().unwrap();
	assert_eq!(redirect.location, "/entries/1/");
}

#[test]
fn disabled_success_action_validates_but_never_performs() {
	let block = block(FormAction::Create).with_success_action(false);
	let view = renderer_for(block, Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
		],
	);

	assert!(view.finalize(&mut request, &mut source).unwrap().is_none());
	assert!(source.is_empty());
}

#[test]
fn captcha_challenges_until_the_session_passes() {
	let view = renderer_for(block(FormAction::Create).with_captcha(true), Settings::default());
	let mut source = entry_source();

	let rendered = view
		.render(&FormRequest::get("/page/"), &source)
		.unwrap();
	assert!(rendered.html.contains(r#"name="test22_first_col_0-captcha""#));
	assert!(rendered.html.contains("What is two plus two?"));

	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
			("test22_first_col_0-captcha", "4"),
		],
	);
	assert!(view.finalize(&mut request, &mut source).unwrap().is_some());

	// The session passed once, so the next render skips the challenge.
	let followup = FormRequest::get("/page/").with_session(request.session().clone());
	let rendered = view.render(&followup, &source).unwrap();
	assert!(!rendered.html.contains("captcha"));
}

#[test]
fn wrong_captcha_answers_block_the_action() {
	let view = renderer_for(block(FormAction::Create).with_captcha(true), Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
			("test22_first_col_0-captcha", "5"),
		],
	);

	assert!(view.finalize(&mut request, &mut source).unwrap().is_none());
	assert!(source.is_empty());
	assert!(!request.session().contains("public_forms_captcha_passed"));
}

#[test]
fn always_policy_keeps_challenging_passed_sessions() {
	let settings = Settings {
		default_enable_captcha_always: true,
		..Settings::default()
	};
	let view = renderer_for(block(FormAction::Create).with_captcha(true), settings);
	let source = entry_source();

	let mut session = Session::new();
	public_forms_pages::captcha::mark_passed(&mut session);
	let request = FormRequest::get("/page/").with_session(session);

	let rendered = view.render(&request, &source).unwrap();
	assert!(rendered.html.contains(r#"name="test22_first_col_0-captcha""#));
}

#[test]
fn captcha_answers_never_reach_the_content_source() {
	let view = renderer_for(block(FormAction::Create).with_captcha(true), Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
			("test22_first_col_0-captcha", "4"),
		],
	);

	view.finalize(&mut request, &mut source).unwrap().unwrap();
	let created = source.get(1).unwrap().unwrap();
	assert!(!created.data.contains_key("captcha"));
	assert_eq!(created.data["name"], json!("Ada"));
}

#[test]
fn ajax_blocks_render_the_module_bootstrap() {
	let view = renderer_for(block(FormAction::Create).with_ajax(true), Settings::default());
	let rendered = view
		.render(&FormRequest::get("/page/"), &entry_source())
		.unwrap();

	assert!(rendered.html.contains(r#"<script type="module">"#));
	assert!(rendered.html.contains(r#"initialize("test22_first_col_0")"#));
	assert!(rendered.html.contains("/static/pkg/public_forms_client.js"));
}

#[test]
fn ajax_blocks_expose_configured_scripts_as_media() {
	let settings = Settings {
		ajax_bootstrap_scripts: vec!["/static/js/forms.js".to_string()],
		..Settings::default()
	};
	let view = renderer_for(block(FormAction::Create).with_ajax(true), settings);
	let rendered = view
		.render(&FormRequest::get("/page/"), &entry_source())
		.unwrap();

	assert_eq!(rendered.media.js_urls(), ["/static/js/forms.js"]);
	assert!(rendered.media.render_js().contains(r#"src="/static/js/forms.js""#));
}

#[test]
fn plain_blocks_carry_no_media() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let rendered = view
		.render(&FormRequest::get("/page/"), &entry_source())
		.unwrap();
	assert!(rendered.media.is_empty());
}

#[test]
fn two_blocks_on_one_page_stay_isolated() {
	let settings = Settings::default();
	let first = renderer_for(
		PublicFormBlock::new(
			BlockIdentity::new("page", "main", 0),
			FormAction::Create,
			ContentRef::new(ContentType::new("guestbook", "entry")),
			&settings,
		),
		settings.clone(),
	);
	let second = renderer_for(
		PublicFormBlock::new(
			BlockIdentity::new("page", "main", 1),
			FormAction::Create,
			ContentRef::new(ContentType::new("guestbook", "entry")),
			&settings,
		),
		settings.clone(),
	);

	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("page_main_1_create", "1"),
			("page_main_1-name", "Grace"),
		],
	);

	assert!(first.finalize(&mut request, &mut source).unwrap().is_none());
	let redirect = second.finalize(&mut request, &mut source).unwrap();
	assert!(redirect.is_some());
	assert_eq!(source.len(), 1);
	assert_eq!(source.get(1).unwrap().unwrap().data["name"], json!("Grace"));
}

#[test]
fn cleaned_values_exclude_unknown_submissions() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let mut source = entry_source();
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_create", "1"),
			("test22_first_col_0-name", "Ada"),
			("test22_first_col_0-rating", "11"),
		],
	);

	view.finalize(&mut request, &mut source).unwrap().unwrap();
	let created = source.get(1).unwrap().unwrap();
	assert!(!created.data.contains_key("rating"));
}

#[test]
fn rendered_blocks_post_back_to_the_page() {
	let view = renderer_for(block(FormAction::Create), Settings::default());
	let rendered = view
		.render(&FormRequest::get("/news/article/?probe"), &entry_source())
		.unwrap();
	assert!(rendered.html.contains(r#"<form method="post" action="/news/article/">"#));
}

fn submit_name_via_dyn(view: &dyn PublicFormView) -> String {
	view.submit_name()
}

#[test]
fn boxed_renderers_expose_their_action() {
	let view = renderer_for(block_with_object(FormAction::Delete, 3), Settings::default());
	assert_eq!(view.action(), FormAction::Delete);
	assert_eq!(view.submit_name(), "test22_first_col_0_delete");
	assert_eq!(submit_name_via_dyn(view.as_ref()), "test22_first_col_0_delete");
}

#[test]
fn update_posts_rewrite_every_content_field() {
	let view = renderer_for(block_with_object(FormAction::Update, 7), Settings::default());
	let mut source = seeded_source(7, "Ada");
	source
		.save(Some(7), &{
			let mut extra = Map::new();
			extra.insert("message".to_string(), Value::String("old".to_string()));
			extra
		})
		.unwrap();

	// The optional message is absent from the POST, so it cleans to
	// empty and overwrites the stored value.
	let mut request = FormRequest::post(
		"/page/",
		&[
			("test22_first_col_0_update", "1"),
			("test22_first_col_0-name", "Grace"),
		],
	);
	view.finalize(&mut request, &mut source).unwrap().unwrap();

	let updated = source.get(7).unwrap().unwrap();
	assert_eq!(updated.data["name"], json!("Grace"));
	assert_eq!(updated.data["message"], json!(""));
}
