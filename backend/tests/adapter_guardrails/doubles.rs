//! Test doubles for driving ports used by the adapter guardrails suite.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend::domain::ports::{
    CreatePatientRequest, CreatePatientResponse, LoginService, PatientCommand, UsersQuery,
};
use backend::domain::{Error, LoginCredentials, User, UserId};

/// Configurable success or failure outcome for RecordingLoginService.
#[derive(Clone)]
pub(crate) enum LoginResponse {
    Ok(UserId),
    Err(Error),
}

/// Configurable outcome for RecordingUsersQuery list calls.
#[derive(Clone)]
pub(crate) enum UsersResponse {
    Ok(Vec<User>),
    Err(Error),
}

/// Configurable outcome for RecordingUsersQuery single-account lookups.
#[derive(Clone)]
pub(crate) enum UserLookupResponse {
    Ok(User),
    Err(Error),
}

/// Configurable outcome for RecordingPatientCommand creates.
#[derive(Clone)]
pub(crate) enum PatientCreateResponse {
    Ok(CreatePatientResponse),
    Err(Error),
}

#[derive(Clone)]
pub(crate) struct RecordingLoginService {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    response: Arc<Mutex<LoginResponse>>,
}

impl RecordingLoginService {
    pub(crate) fn new(response: LoginResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("login calls lock").clone()
    }

    pub(crate) fn set_response(&self, response: LoginResponse) {
        *self.response.lock().expect("login response lock") = response;
    }
}

#[async_trait]
impl LoginService for RecordingLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        self.calls.lock().expect("login calls lock").push((
            credentials.username().to_owned(),
            credentials.password().to_owned(),
        ));
        match self.response.lock().expect("login response lock").clone() {
            LoginResponse::Ok(user_id) => Ok(user_id),
            LoginResponse::Err(error) => Err(error),
        }
    }
}

/// Records list calls as a counter and lookups by the requested id, with an
/// independently configurable outcome for each operation.
#[derive(Clone)]
pub(crate) struct RecordingUsersQuery {
    list_calls: Arc<Mutex<usize>>,
    lookup_calls: Arc<Mutex<Vec<String>>>,
    list_response: Arc<Mutex<UsersResponse>>,
    lookup_response: Arc<Mutex<UserLookupResponse>>,
}

impl RecordingUsersQuery {
    pub(crate) fn new(list_response: UsersResponse, lookup_response: UserLookupResponse) -> Self {
        Self {
            list_calls: Arc::new(Mutex::new(0)),
            lookup_calls: Arc::new(Mutex::new(Vec::new())),
            list_response: Arc::new(Mutex::new(list_response)),
            lookup_response: Arc::new(Mutex::new(lookup_response)),
        }
    }

    pub(crate) fn list_calls(&self) -> usize {
        *self.list_calls.lock().expect("users list calls lock")
    }

    pub(crate) fn lookup_calls(&self) -> Vec<String> {
        self.lookup_calls
            .lock()
            .expect("users lookup calls lock")
            .clone()
    }

    pub(crate) fn set_list_response(&self, response: UsersResponse) {
        *self.list_response.lock().expect("users list response lock") = response;
    }

    pub(crate) fn set_lookup_response(&self, response: UserLookupResponse) {
        *self
            .lookup_response
            .lock()
            .expect("users lookup response lock") = response;
    }
}

#[async_trait]
impl UsersQuery for RecordingUsersQuery {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        *self.list_calls.lock().expect("users list calls lock") += 1;
        match self
            .list_response
            .lock()
            .expect("users list response lock")
            .clone()
        {
            UsersResponse::Ok(users) => Ok(users),
            UsersResponse::Err(error) => Err(error),
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.lookup_calls
            .lock()
            .expect("users lookup calls lock")
            .push(id.to_string());
        match self
            .lookup_response
            .lock()
            .expect("users lookup response lock")
            .clone()
        {
            UserLookupResponse::Ok(user) => Ok(user),
            UserLookupResponse::Err(error) => Err(error),
        }
    }
}

#[derive(Clone)]
pub(crate) struct RecordingPatientCommand {
    calls: Arc<Mutex<Vec<CreatePatientRequest>>>,
    response: Arc<Mutex<PatientCreateResponse>>,
}

impl RecordingPatientCommand {
    pub(crate) fn new(response: PatientCreateResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub(crate) fn calls(&self) -> Vec<CreatePatientRequest> {
        self.calls.lock().expect("patient calls lock").clone()
    }

    pub(crate) fn set_response(&self, response: PatientCreateResponse) {
        *self.response.lock().expect("patient response lock") = response;
    }
}

#[async_trait]
impl PatientCommand for RecordingPatientCommand {
    async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<CreatePatientResponse, Error> {
        self.calls
            .lock()
            .expect("patient calls lock")
            .push(request);
        match self.response.lock().expect("patient response lock").clone() {
            PatientCreateResponse::Ok(response) => Ok(response),
            PatientCreateResponse::Err(error) => Err(error),
        }
    }
}
