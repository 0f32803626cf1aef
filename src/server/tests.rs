#[cfg(test)]
mod tests {
    use actix::prelude::*;
    use actix_web::{test, web, App, http::{Method, StatusCode}};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::grid::{GridBounds, GridError, Position, SpaceId, SpacePayload};
    use crate::server::allocator::messages::*;
    use crate::server::allocator::server::GridAllocator;
    use crate::server::state::AppState;

    fn payload(name: &str) -> SpacePayload {
        SpacePayload { name: name.to_string(), ..SpacePayload::default() }
    }

    /// Collects layout pushes so tests can count them.
    #[derive(Default)]
    struct Recorder {
        updates: Vec<LayoutUpdate>,
    }

    impl Actor for Recorder {
        type Context = Context<Self>;
    }

    impl Handler<LayoutUpdate> for Recorder {
        type Result = ();

        fn handle(&mut self, msg: LayoutUpdate, _: &mut Context<Self>) {
            self.updates.push(msg);
        }
    }

    #[derive(Message)]
    #[rtype(result = "usize")]
    struct CountUpdates;

    impl Handler<CountUpdates> for Recorder {
        type Result = usize;

        fn handle(&mut self, _: CountUpdates, _: &mut Context<Self>) -> usize {
            self.updates.len()
        }
    }

    #[actix_web::test]
    async fn test_concurrent_place_on_same_cell_succeeds_once() {
        let addr = GridAllocator::new().start();
        let target = Position::new(3, 3);

        let (first, second) = tokio::join!(
            addr.send(PlaceSpace { position: target, payload: payload("A") }),
            addr.send(PlaceSpace { position: target, payload: payload("B") }),
        );
        let results = [first.unwrap(), second.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(GridError::Conflict { .. }))));

        let layout = addr.send(GetLayout).await.unwrap();
        assert_eq!(layout.spaces.len(), 1);
        assert_eq!(layout.spaces[0].position, target);
        assert_eq!(layout.bounds, GridBounds { rows: 4, cols: 4 });
    }

    #[actix_web::test]
    async fn test_racing_relocations_leave_one_space_per_cell() {
        let addr = GridAllocator::new().start();
        let mut ids = Vec::new();
        for x in 0..6 {
            let space = addr
                .send(PlaceSpace { position: Position::new(x, 0), payload: payload("S") })
                .await
                .unwrap()
                .unwrap();
            ids.push(space.id);
        }

        let handles: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let addr = addr.clone();
                actix_web::rt::spawn(async move {
                    addr.send(RelocateSpace { id, position: Position::new(9, 9) }).await
                })
            })
            .collect();

        let mut moved = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_ok() {
                moved += 1;
            }
        }
        assert_eq!(moved, 1);

        let layout = addr.send(GetLayout).await.unwrap();
        let at_target = layout.spaces.iter().filter(|s| s.position == Position::new(9, 9)).count();
        assert_eq!(at_target, 1);
        assert_eq!(layout.spaces.len(), 6);
    }

    #[actix_web::test]
    async fn test_subscribers_see_only_real_changes() {
        let addr = GridAllocator::new().start();
        let recorder = Recorder::default().start();
        addr.send(Subscribe { session_id: Uuid::new_v4(), addr: recorder.clone().recipient() })
            .await
            .unwrap();

        let space = addr
            .send(PlaceSpace { position: Position::new(0, 0), payload: payload("A") })
            .await
            .unwrap()
            .unwrap();
        // Conflict, self-move and in-bounds capacity request change nothing.
        let _ = addr.send(PlaceSpace { position: Position::new(0, 0), payload: payload("B") }).await;
        let _ = addr.send(RelocateSpace { id: space.id.clone(), position: Position::new(0, 0) }).await;
        let _ = addr.send(EnsureCapacity { position: Position::new(0, 0) }).await;
        assert_eq!(recorder.send(CountUpdates).await.unwrap(), 2);

        let _ = addr.send(EnsureCapacity { position: Position::new(2, 2) }).await;
        let _ = addr.send(RemoveSpace { id: space.id }).await;
        assert_eq!(recorder.send(CountUpdates).await.unwrap(), 4);
    }

    #[actix_web::test]
    async fn test_unsubscribed_session_stops_receiving() {
        let addr = GridAllocator::new().start();
        let recorder = Recorder::default().start();
        let session_id = Uuid::new_v4();
        addr.send(Subscribe { session_id, addr: recorder.clone().recipient() }).await.unwrap();
        addr.send(Unsubscribe { session_id }).await.unwrap();

        let _ = addr.send(PlaceSpace { position: Position::new(1, 1), payload: payload("A") }).await;
        assert_eq!(recorder.send(CountUpdates).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_http_space_lifecycle() {
        let addr = GridAllocator::new().start();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(addr)))
                .configure(crate::server::router::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/spaces")
            .set_json(json!({"position": {"x": 0, "y": 0}, "name": "Desk 1", "capacity": 2, "status": "free"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["name"], "Desk 1");
        assert_eq!(created["capacity"], 2);
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/spaces")
            .set_json(json!({"position": {"x": 0, "y": 0}, "name": "Desk 2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "SPACE_CONFLICT");
        assert_eq!(body["error"]["context"], id.as_str());

        let req = test::TestRequest::get().uri("/grid/frontier").to_request();
        let frontier: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(frontier["cells"], json!([{"x": 1, "y": 0}, {"x": 0, "y": 1}, {"x": 1, "y": 1}]));

        let req = test::TestRequest::put()
            .uri(&format!("/spaces/{}/position", id))
            .set_json(json!({"x": 5, "y": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/grid").to_request();
        let layout: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(layout["bounds"], json!({"rows": 6, "cols": 6}));
        assert_eq!(layout["spaces"][0]["position"], json!({"x": 5, "y": 5}));

        let req = test::TestRequest::patch()
            .uri(&format!("/spaces/{}", id))
            .set_json(json!({"name": "Desk 1b", "status": {"booked": true}}))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], json!({"booked": true}));
        assert_eq!(updated["position"], json!({"x": 5, "y": 5}));

        let req = test::TestRequest::delete().uri(&format!("/spaces/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&format!("/spaces/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/grid").to_request();
        let layout: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(layout["bounds"], json!({"rows": 6, "cols": 6}));
        assert_eq!(layout["spaces"], json!([]));
    }

    #[actix_web::test]
    async fn test_http_error_statuses() {
        let addr = GridAllocator::new().start();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(addr)))
                .configure(crate::server::router::config),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/spaces/ghost/position")
            .set_json(json!({"x": 0, "y": 0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "SPACE_NOT_FOUND");
        assert_eq!(body["error"]["context"], SpaceId::from("ghost").as_str());

        let req = test::TestRequest::post()
            .uri("/spaces")
            .set_json(json!({"position": {"x": -1, "y": 2}, "name": "Nowhere"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_POSITION");

        let req = test::TestRequest::post()
            .uri("/grid/capacity")
            .set_json(json!({"x": 3, "y": 1}))
            .to_request();
        let bounds: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(bounds, json!({"rows": 2, "cols": 4}));

        let req = test::TestRequest::get().uri("/spaces").to_request();
        let spaces: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(spaces, json!([]));
    }

    #[actix_web::test]
    async fn test_cors_preflight_allows_relocate_from_browser() {
        let addr = GridAllocator::new().start();
        let app = test::init_service(
            App::new()
                .wrap(crate::server::router::cors())
                .app_data(web::Data::new(AppState::new(addr)))
                .configure(crate::server::router::config),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/spaces/abc/position")
            .insert_header(("Origin", "http://localhost:3000"))
            .insert_header(("Access-Control-Request-Method", "PUT"))
            .insert_header(("Access-Control-Request-Headers", "content-type"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "preflight returned {}", resp.status());
        assert!(resp.headers().contains_key("access-control-allow-origin"));
        assert!(resp.headers().contains_key("access-control-allow-methods"));

        let req = test::TestRequest::put()
            .uri("/spaces/abc/position")
            .insert_header(("Origin", "http://localhost:3000"))
            .set_json(json!({"x": 1, "y": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }
}
