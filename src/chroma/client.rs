//! The Chroma client: heartbeat, create collection, get collection.

use super::{
    CollectionRef, Error, MAX_RESPONSE_LEN, Options, ResponseBody, StatusPolicy, parse_collection,
    validate_name,
};
use crate::network::application::http::{
    Client as HttpClient, Endpoint, Header, Method, Request, Response,
};
use crate::network::error::Error as NetworkError;
use crate::network::{Close, Connect};
use heapless::{String, Vec};
use serde::Serialize;

const HEARTBEAT_PATH: &str = "/heartbeat";
const COLLECTIONS_PATH: &str = "/api/v1/collections";

/// Longest request path built by the client.
const MAX_PATH_LEN: usize = 256;
/// Longest JSON request body built by the client.
const MAX_BODY_LEN: usize = 128;

#[derive(Serialize)]
struct NewCollection<'a> {
    name: &'a str,
}

/// A Chroma client that opens one connection per operation through `N`.
#[derive(Debug)]
pub struct ChromaClient<'a, N>
where
    N: Connect<Error = NetworkError>,
{
    connector: N,
    endpoint: Endpoint<'a>,
    options: Options<'a>,
    last_error: Option<Error>,
}

impl<'a, N> ChromaClient<'a, N>
where
    N: Connect<Error = NetworkError>,
{
    /// Creates a client, validating `options.base_url` up front.
    pub fn new(connector: N, options: Options<'a>) -> Result<Self, Error> {
        let endpoint = Endpoint::parse(options.base_url)?;
        Ok(Self {
            connector,
            endpoint,
            options,
            last_error: None,
        })
    }

    /// Checks that the server is reachable with `GET /heartbeat`.
    ///
    /// Returns `false` on failure; the reason is logged and available from
    /// [`last_error`](Self::last_error).
    pub fn heartbeat(&mut self) -> bool {
        self.last_error = None;
        match self.try_heartbeat() {
            Ok(()) => {
                debug!("heartbeat: success");
                true
            }
            Err(e) => {
                self.report("heartbeat", e);
                false
            }
        }
    }

    /// Like [`heartbeat`](Self::heartbeat), returning the error instead.
    pub fn try_heartbeat(&mut self) -> Result<(), Error> {
        let path: String<MAX_PATH_LEN> = self.endpoint.path(&[HEARTBEAT_PATH])?;
        self.exchange(Method::Get, &path, None).map(|_| ())
    }

    /// Creates a collection named `name` with `POST /api/v1/collections`.
    ///
    /// Names outside `[A-Za-z0-9_-]{1,63}` are rejected before anything is
    /// sent.
    pub fn create_collection(&mut self, name: &str) -> bool {
        self.last_error = None;
        match self.try_create_collection(name) {
            Ok(()) => true,
            Err(e) => {
                self.report("create collection", e);
                false
            }
        }
    }

    /// Like [`create_collection`](Self::create_collection), returning the error instead.
    pub fn try_create_collection(&mut self, name: &str) -> Result<(), Error> {
        validate_name(name)?;

        let mut body = [0u8; MAX_BODY_LEN];
        let len = serde_json_core::to_slice(&NewCollection { name }, &mut body)
            .map_err(|_| Error::OutOfMemory)?;

        let path: String<MAX_PATH_LEN> = self.endpoint.path(&[COLLECTIONS_PATH])?;
        self.exchange(Method::Post, &path, Some(&body[..len]))
            .map(|_| ())
    }

    /// Fetches the raw body of `GET /api/v1/collections/{name}`.
    ///
    /// The buffer is empty when the request failed.
    pub fn get_collection(&mut self, name: &str) -> ResponseBody {
        self.last_error = None;
        match self.try_get_collection(name) {
            Ok(body) => body,
            Err(e) => {
                self.report("get collection", e);
                ResponseBody::new()
            }
        }
    }

    /// Like [`get_collection`](Self::get_collection), returning the error instead.
    pub fn try_get_collection(&mut self, name: &str) -> Result<ResponseBody, Error> {
        validate_name(name)?;
        let path: String<MAX_PATH_LEN> = self.endpoint.path(&[COLLECTIONS_PATH, "/", name])?;
        let response = self.exchange(Method::Get, &path, None)?;
        Ok(response.body)
    }

    /// Fetches and decodes a collection.
    ///
    /// Failures of either step yield an empty [`CollectionRef`]; a body that
    /// is not a JSON object is reported as [`Error::Decode`].
    pub fn fetch_collection(&mut self, name: &str) -> CollectionRef {
        let body = self.get_collection(name);
        if body.is_empty() {
            return CollectionRef::default();
        }
        match parse_collection(&body) {
            Ok(collection) => collection,
            Err(e) => {
                self.report("decode collection", e);
                CollectionRef::default()
            }
        }
    }

    /// The failure of the most recent operation, if it failed.
    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    /// The parsed base URL.
    pub fn endpoint(&self) -> &Endpoint<'a> {
        &self.endpoint
    }

    /// The options the client was built with.
    pub fn options(&self) -> &Options<'a> {
        &self.options
    }

    /// Get a mutable reference to the connector
    pub fn connector_mut(&mut self) -> &mut N {
        &mut self.connector
    }

    fn report(&mut self, operation: &str, e: Error) {
        warn!("{} failed: {:?}", operation, e);
        self.last_error = Some(e);
    }

    /// Runs one request on a fresh connection and applies the status policy.
    fn exchange(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Response<MAX_RESPONSE_LEN>, Error> {
        let mut headers = Vec::new();
        for (name, value) in [
            ("Host", self.endpoint.authority()),
            ("Connection", "close"),
            ("User-Agent", self.options.user_agent),
            ("Accept", "application/json"),
        ] {
            headers
                .push(Header::new(name, value)?)
                .map_err(|_| Error::OutOfMemory)?;
        }
        if body.is_some() {
            headers
                .push(Header::new("Content-Type", "application/json")?)
                .map_err(|_| Error::OutOfMemory)?;
        }
        let request = Request {
            method,
            path,
            headers,
            body,
        };

        let remote = self.endpoint.remote()?;
        let connection = self.connector.connect(&remote)?;
        let mut http = HttpClient::new(connection);
        let result = http.request::<MAX_RESPONSE_LEN>(&request);
        // The server closes its side after the response anyway.
        let _ = http.into_inner().close();

        let response = result?;
        if self.options.status_policy == StatusPolicy::Require2xx && !response.is_success() {
            return Err(Error::Status(response.status_code));
        }
        Ok(response)
    }
}
